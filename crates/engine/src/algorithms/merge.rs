use super::{ratio, StepContext};

#[derive(Debug, Clone, Copy)]
enum Task {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

fn split(left: usize, right: usize) -> usize {
    left + (right - left) / 2
}

/// Visits the tasks of a top-down merge sort over `0..n` in recursion order.
fn for_each_task(n: usize, mut visit: impl FnMut(Task)) {
    let mut stack = Vec::new();
    if n > 0 {
        stack.push(Task::Sort {
            left: 0,
            right: n - 1,
        });
    }
    while let Some(task) = stack.pop() {
        if let Task::Sort { left, right } = task {
            if left < right {
                let mid = split(left, right);
                stack.push(Task::Merge { left, mid, right });
                stack.push(Task::Sort {
                    left: mid + 1,
                    right,
                });
                stack.push(Task::Sort { left, right: mid });
            }
        }
        visit(task);
    }
}

/// Total number of element placements across every merge for length `n`.
pub fn merge_work(n: usize) -> usize {
    let mut total = 0;
    for_each_task(n, |task| {
        if let Task::Merge { left, right, .. } = task {
            total += right - left + 1;
        }
    });
    total
}

pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();
    let total = merge_work(n);

    let mut merges = Vec::new();
    for_each_task(n, |task| {
        if let Task::Merge { left, mid, right } = task {
            merges.push((left, mid, right));
        }
    });

    let mut done = 0;
    for (left, mid, right) in merges {
        // Only the top-level merge writes values into their final positions.
        let last = left == 0 && right + 1 == n;
        merge(ctx, left, mid, right, last).await;
        done += right - left + 1;
        ctx.report_progress(ratio(done, total));
    }
}

/// Merges the sorted runs `left..=mid` and `mid + 1..=right`. Ties take the
/// left run first, which keeps the sort stable. Each element taken from the
/// right run counts as a swap. With `settle` every written slot is final.
async fn merge(
    ctx: &mut StepContext<'_>,
    left: usize,
    mid: usize,
    right: usize,
    settle: bool,
) {
    let left_run = ctx.values()[left..=mid].to_vec();
    let right_run = ctx.values()[mid + 1..=right].to_vec();

    let (mut a, mut b, mut k) = (0, 0, left);
    while a < left_run.len() && b < right_run.len() {
        // The right head has not been overwritten yet: k < mid + 1 + b.
        let right_pos = mid + 1 + b;
        ctx.compare(k, right_pos).await;
        if left_run[a] <= right_run[b] {
            ctx.place(k, left_run[a]);
            a += 1;
        } else {
            ctx.shift(k, right_pos).await;
            b += 1;
        }
        ctx.release(k, right_pos);
        if settle {
            ctx.settle(k);
        }
        k += 1;
    }

    for &value in left_run[a..].iter().chain(&right_run[b..]) {
        ctx.place(k, value);
        if settle {
            ctx.settle(k);
        }
        k += 1;
    }
}
