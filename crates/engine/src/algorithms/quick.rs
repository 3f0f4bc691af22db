use super::{ratio, StepContext};

pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();
    let mut settled = 0;
    let mut pending = Vec::new();
    if n > 0 {
        pending.push((0, n - 1));
    }

    while let Some((low, high)) = pending.pop() {
        if low == high {
            ctx.settle(low);
            settled += 1;
            ctx.report_progress(ratio(settled, n));
            continue;
        }

        let pivot = partition(ctx, low, high).await;
        ctx.settle(pivot);
        settled += 1;
        ctx.report_progress(ratio(settled, n));

        // Right side first so the left side is processed next.
        if pivot < high {
            pending.push((pivot + 1, high));
        }
        if pivot > low {
            pending.push((low, pivot - 1));
        }
    }
}

/// Lomuto partition of `low..=high` around the value at `high`.
async fn partition(ctx: &mut StepContext<'_>, low: usize, high: usize) -> usize {
    let pivot = ctx.value(high);
    let mut store = low;

    for j in low..high {
        ctx.compare(j, high).await;
        if ctx.value(j) < pivot {
            if store != j {
                ctx.swap(store, j).await;
                ctx.release(store, j);
            }
            store += 1;
        }
        ctx.release(j, high);
    }

    if store != high {
        ctx.swap(store, high).await;
        ctx.release(store, high);
    }
    store
}
