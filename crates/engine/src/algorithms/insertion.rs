use super::{ratio, StepContext};

/// Each shift counts one comparison and one swap. The comparison that stops
/// the shifting is shown but not counted.
pub(super) async fn run(ctx: &mut StepContext<'_>) {
    let n = ctx.len();
    let span = n.saturating_sub(1);
    for i in 1..n {
        ctx.report_progress(ratio(i, span));
        let key = ctx.value(i);
        let mut hole = i;

        ctx.inspect(i, i - 1).await;

        while hole > 0 && ctx.value(hole - 1) > key {
            ctx.tally_comparison(hole - 1, hole);
            ctx.shift(hole, hole - 1).await;
            ctx.release(hole - 1, hole);
            hole -= 1;
        }

        ctx.place(hole, key);
        ctx.release(i - 1, i);
        ctx.settle(i);
    }
}
