use super::{ratio, StepContext};

pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();
    let passes = n.saturating_sub(1);
    for i in 0..passes {
        ctx.report_progress(ratio(i, passes));
        let mut min_index = i;
        for j in i + 1..n {
            let current = min_index;
            ctx.compare(current, j).await;
            if ctx.value(j) < ctx.value(current) {
                min_index = j;
            }
            ctx.release(current, j);
        }
        if min_index != i {
            ctx.swap(i, min_index).await;
            ctx.release(i, min_index);
        }
        ctx.settle(i);
    }
    if n > 0 {
        ctx.settle(n - 1);
    }
}
