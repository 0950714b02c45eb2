/// Summary statistics derived from the task list
///
/// Pending counts everything that is not completed, so in-progress tasks are
/// pending for stats purposes. Productivity is the completion percentage,
/// rounded to the nearest whole percent, and 0 for an empty list.

use serde::{Deserialize, Serialize};
use taskdash_shared::models::task::{Task, TaskStatus};

/// Dashboard summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of tasks
    pub total_tasks: usize,

    /// Tasks in completed status
    pub completed_tasks: usize,

    /// Tasks not yet completed (total - completed)
    pub pending_tasks: usize,

    /// round(100 * completed / total), 0 when there are no tasks
    pub productivity: u32,
}

/// Derives dashboard stats from a task list
pub fn derive_stats(tasks: &[Task]) -> DashboardStats {
    let total = tasks.len();
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();

    let productivity = if total > 0 {
        (100.0 * completed as f64 / total as f64).round() as u32
    } else {
        0
    };

    DashboardStats {
        total_tasks: total,
        completed_tasks: completed,
        pending_tasks: total - completed,
        productivity,
    }
}
