use crate::{BoardGrid, CaptureMatrix, BOARD_SIZE};

/// Draws a board with one character per cell, row and column numbers on the edges.
pub fn visualize_grid(grid: &BoardGrid) -> String {
    draw_box(1, |i, j| grid.rows()[i][j].symbol().to_string())
}

/// Draws the counts of a capture matrix, right-aligned. Zero counts are left blank.
pub fn visualize_heatmap(matrix: &CaptureMatrix) -> String {
    let width = matrix.max().to_string().len();
    draw_box(width, |i, j| match matrix.rows()[i][j] {
        0 => String::new(),
        count => count.to_string(),
    })
}

fn draw_box(width: usize, mut content: impl FnMut(usize, usize) -> String) -> String {
    // Draw the top of the box
    let mut result = String::from("    ");
    for j in 0..BOARD_SIZE {
        result += &format!(" {:>width$}", j, width = width);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += &"─".repeat(width + 1);
    }
    result += "─╮\n";

    for i in 0..BOARD_SIZE {
        result += &format!("{:>2} │", i);
        for j in 0..BOARD_SIZE {
            result += &format!(" {:>width$}", content(i, j), width = width);
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..BOARD_SIZE {
        result += &"─".repeat(width + 1);
    }
    result += "─╯";
    result
}
