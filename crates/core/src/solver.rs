//! Minimum-HP dynamic program with path reconstruction.
//!
//! `dp[i][j]` is the minimum HP needed when entering cell `(i, j)` to reach
//! the bottom-right cell alive. The table has one extra row and column of
//! unreachable sentinels, except for the two virtual cells next to the goal
//! which are seeded with `1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Grid;

const UNREACHABLE: i64 = i64::MAX;

/// Minimum starting HP and the route that achieves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Solution {
    /// Minimum initial health, always at least 1.
    #[serde(rename = "minimumHP")]
    pub minimum_hp: i64,
    /// `(row, col)` steps from `(0, 0)` to `(m - 1, n - 1)`, moving right or down.
    pub path: Vec<(usize, usize)>,
}

/// Solve a validated grid.
///
/// Never fails: `Grid` construction already rejected malformed input.
pub fn solve(grid: &Grid) -> Solution {
    let dp = cost_table(grid);
    let path = reconstruct_path(&dp, grid.rows(), grid.cols());
    Solution { minimum_hp: dp[0][0], path }
}

fn cost_table(grid: &Grid) -> Vec<Vec<i64>> {
    let (m, n) = (grid.rows(), grid.cols());
    let mut dp = vec![vec![UNREACHABLE; n + 1]; m + 1];
    dp[m][n - 1] = 1;
    dp[m - 1][n] = 1;

    for i in (0..m).rev() {
        for j in (0..n).rev() {
            let need = dp[i + 1][j].min(dp[i][j + 1]).saturating_sub(i64::from(grid.at(i, j)));
            // HP entering a cell is never allowed to reach zero.
            dp[i][j] = if need <= 0 { 1 } else { need };
        }
    }

    dp
}

/// Walk the table greedily from the start cell.
///
/// Moves down only when the cell below is strictly cheaper; ties move right.
fn reconstruct_path(dp: &[Vec<i64>], m: usize, n: usize) -> Vec<(usize, usize)> {
    let mut path = Vec::with_capacity(m + n - 1);
    let (mut i, mut j) = (0, 0);

    loop {
        path.push((i, j));
        if i == m - 1 && j == n - 1 {
            break;
        }

        let can_down = i + 1 < m;
        let can_right = j + 1 < n;
        if can_down && can_right {
            if dp[i + 1][j] < dp[i][j + 1] {
                i += 1;
            } else {
                j += 1;
            }
        } else if can_down {
            i += 1;
        } else {
            j += 1;
        }
    }

    path
}
