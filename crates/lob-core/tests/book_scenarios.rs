// crates/lob-core/tests/book_scenarios.rs
use lob_core::{BookError, OrderBook, OrderId, SequentialIdGenerator, Side};

fn book() -> OrderBook<SequentialIdGenerator> {
    OrderBook::with_id_generator(SequentialIdGenerator::default())
}

#[test]
fn maker_price_walkthrough() {
    let mut book = book();

    let first = book.submit(Side::Buy, 100, 10).unwrap();
    assert!(first.trades.is_empty());
    assert_eq!(first.resting_quantity, 10);

    let second = book.submit(Side::Sell, 100, 4).unwrap();
    assert_eq!(second.trades.len(), 1);
    assert_eq!((second.trades[0].price, second.trades[0].quantity), (100, 4));
    assert_eq!(second.resting_quantity, 0);
    assert!(book.side(Side::Sell).is_empty());
    assert_eq!(book.get_order(&first.order_id, Side::Buy).map(|o| o.quantity), Some(6));

    // The aggressor's limit is 90, but the resting buy set the price.
    let third = book.submit(Side::Sell, 90, 10).unwrap();
    assert_eq!(third.trades.len(), 1);
    assert_eq!((third.trades[0].price, third.trades[0].quantity), (100, 6));
    assert_eq!(third.trades[0].maker_order_id, first.order_id);
    assert!(book.side(Side::Buy).is_empty());

    let asks = book.resting_orders(Side::Sell);
    assert_eq!(asks.len(), 1);
    assert_eq!(asks[0].id, third.order_id);
    assert_eq!((asks[0].price, asks[0].quantity), (90, 4));
}

#[test]
fn zero_quantity_leaves_book_identical() {
    let mut book = book();
    book.submit(Side::Buy, 49, 3).unwrap();
    book.submit(Side::Sell, 55, 3).unwrap();
    let bids = book.side(Side::Buy).clone();
    let asks = book.side(Side::Sell).clone();

    assert_eq!(book.submit(Side::Buy, 50, 0), Err(BookError::InvalidQuantity));

    assert_eq!(book.side(Side::Buy), &bids);
    assert_eq!(book.side(Side::Sell), &asks);
}

#[test]
fn unknown_cancel_leaves_book_identical() {
    let mut book = book();
    book.submit(Side::Buy, 99, 3).unwrap();
    book.submit(Side::Sell, 101, 3).unwrap();
    let bids = book.side(Side::Buy).clone();
    let asks = book.side(Side::Sell).clone();

    let err = book.cancel(&OrderId::from("nonexistent"), Side::Buy).unwrap_err();
    assert!(matches!(err, BookError::OrderNotFound { side: Side::Buy, .. }));

    assert_eq!(book.side(Side::Buy), &bids);
    assert_eq!(book.side(Side::Sell), &asks);
}

#[test]
fn cancel_removes_only_the_target() {
    let mut book = book();
    let a = book.submit(Side::Sell, 100, 1).unwrap().order_id;
    let b = book.submit(Side::Sell, 100, 2).unwrap().order_id;
    let c = book.submit(Side::Sell, 99, 3).unwrap().order_id;

    book.cancel(&b, Side::Sell).unwrap();

    let remaining: Vec<OrderId> = book.resting_orders(Side::Sell).into_iter().map(|o| o.id).collect();
    assert_eq!(remaining, vec![c, a]);
}

#[test]
fn filled_orders_cannot_be_cancelled() {
    let mut book = book();
    let maker = book.submit(Side::Buy, 100, 5).unwrap().order_id;
    book.submit(Side::Sell, 100, 5).unwrap();

    assert_eq!(
        book.cancel(&maker, Side::Buy),
        Err(BookError::OrderNotFound {
            id: maker.clone(),
            side: Side::Buy,
        })
    );
}

#[test]
fn touching_prices_trade_rather_than_cross() {
    let mut book = book();
    book.submit(Side::Sell, 100, 5).unwrap();
    let report = book.submit(Side::Buy, 100, 2).unwrap();

    assert_eq!(report.filled_quantity(), 2);
    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), Some(100));
    assert!(!book.is_crossed());
}
