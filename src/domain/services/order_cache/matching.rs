//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Quantity matching for a single security. There is no price in the model: buy and sell quantity
// is paired greedily in index order, and a buy never pairs with a sell from its own company.
//
// | Name            | Description                                             | Return Type |
// |-----------------|---------------------------------------------------------|-------------|
// | matching_size   | Pairs buys against sells and consumes matched quantity  | u64         |
//--------------------------------------------------------------------------------------------------

use tracing::trace;

use crate::domain::models::types::{Order, Side};

/// Matches the orders at `positions` against each other and returns the total quantity paired.
///
/// Buys and sells keep the relative order they have in `positions`. Each buy scans the sells
/// until it is exhausted; sells that are already empty or belong to the buy's company are skipped.
/// Matched quantity is subtracted from both orders in place, so a second call over the same
/// orders returns at most what the first one did.
///
/// Runs in O(B·S) for B buys and S sells.
pub fn matching_size(orders: &mut [Order], positions: &[usize]) -> u64 {
    let (buys, sells): (Vec<usize>, Vec<usize>) = positions
        .iter()
        .copied()
        .partition(|&position| orders[position].side() == Side::Buy);

    let mut total: u64 = 0;

    for &buy_position in &buys {
        let mut remaining = orders[buy_position].qty();
        if remaining == 0 {
            continue;
        }

        for &sell_position in &sells {
            let sell = &orders[sell_position];
            let sell_qty = sell.qty();
            // Self-trade prevention
            if sell_qty == 0 || sell.company() == orders[buy_position].company() {
                continue;
            }

            let matched = remaining.min(sell_qty);
            trace!(
                "Matched {} between {} and {}",
                matched,
                orders[buy_position].order_id(),
                sell.order_id()
            );
            orders[sell_position].set_qty(sell_qty - matched);
            remaining -= matched;
            total += u64::from(matched);

            if remaining == 0 {
                break;
            }
        }

        orders[buy_position].set_qty(remaining);
    }

    total
}
