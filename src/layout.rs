//! Shell window placement: a fixed box anchored near the bottom-center of
//! the primary display's work area.

pub const SHELL_WIDTH: i32 = 800;
pub const SHELL_HEIGHT: i32 = 600;

/// Gap between the window's bottom edge and the work-area bottom.
pub const BOTTOM_GAP: i32 = 20;

/// Work area of the primary display, taskbar excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Top-left corner for the shell window: centered horizontally, bottom
/// edge `BOTTOM_GAP` above the work-area bottom.
pub fn shell_origin(work: WorkArea) -> (i32, i32) {
    let width = work.right - work.left;
    let x = work.left + (width - SHELL_WIDTH) / 2;
    let y = work.bottom - SHELL_HEIGHT - BOTTOM_GAP;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_on_1080p_work_area() {
        let work = WorkArea {
            left: 0,
            top: 0,
            right: 1920,
            bottom: 1080,
        };
        assert_eq!(shell_origin(work), (560, 460));
    }

    #[test]
    fn bottom_edge_sits_above_work_area_bottom() {
        let work = WorkArea {
            left: 0,
            top: 0,
            right: 2560,
            bottom: 1400,
        };
        let (_, y) = shell_origin(work);
        assert_eq!(y + SHELL_HEIGHT + BOTTOM_GAP, work.bottom);
    }

    #[test]
    fn respects_work_area_offset() {
        // Primary display to the right of a secondary one.
        let work = WorkArea {
            left: 1920,
            top: 0,
            right: 3840,
            bottom: 1080,
        };
        assert_eq!(shell_origin(work), (1920 + 560, 460));
    }
}
