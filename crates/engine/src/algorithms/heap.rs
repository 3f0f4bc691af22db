use super::{ratio, StepContext};

pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();

    for root in (0..n / 2).rev() {
        sift_down(ctx, n, root).await;
    }

    let extractions = n.saturating_sub(1);
    for end in (1..n).rev() {
        ctx.report_progress(ratio(n - end, extractions));
        ctx.swap(0, end).await;
        ctx.release(0, end);
        ctx.settle(end);
        sift_down(ctx, end, 0).await;
    }

    if n > 0 {
        ctx.settle(0);
    }
}

/// Restores the max-heap property for the subtree at `root` within `0..len`.
async fn sift_down(ctx: &mut StepContext<'_>, len: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < len {
            ctx.compare(largest, left).await;
            if ctx.value(left) > ctx.value(largest) {
                largest = left;
            }
            ctx.release(root, left);
        }

        if right < len {
            let current = largest;
            ctx.compare(current, right).await;
            if ctx.value(right) > ctx.value(current) {
                largest = right;
            }
            ctx.release(current, right);
        }

        if largest == root {
            break;
        }

        ctx.swap(root, largest).await;
        ctx.release(root, largest);
        root = largest;
    }
}
