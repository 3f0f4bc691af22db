use super::{ratio, StepContext};

pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();
    let passes = n.saturating_sub(1);
    for i in 0..passes {
        ctx.report_progress(ratio(i, passes));
        for j in 0..n - i - 1 {
            ctx.compare(j, j + 1).await;
            if ctx.value(j) > ctx.value(j + 1) {
                ctx.swap(j, j + 1).await;
            }
            ctx.release(j, j + 1);
        }
        ctx.settle(n - i - 1);
    }
    if n > 0 {
        ctx.settle(0);
    }
}
