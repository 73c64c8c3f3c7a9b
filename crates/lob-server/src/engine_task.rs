//! Central engine loop.
//!
//! One task owns the `OrderBook` and applies `EngineCommand`s strictly
//! one after another, in the order they arrive on the queue. Every
//! client goes through an [`EngineHandle`], so no two submits or
//! cancels ever touch the book at the same time.
//!
//! Each response goes back only to the requester that sent the command;
//! nothing is broadcast.

use lob_core::{
    BookError, DepthSnapshot, IdGenerator, Order, OrderBook, OrderId, Price, Quantity, Request,
    Response, Side, SubmitReport, TopOfBookSnapshot,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::types::{EngineCommand, EngineError, EngineRx, EngineTx};

/// Run the central engine processing loop until every sender is dropped.
pub async fn run_engine_loop<G: IdGenerator>(mut engine_rx: EngineRx, mut book: OrderBook<G>) {
    while let Some(cmd) = engine_rx.recv().await {
        let EngineCommand { request, reply } = cmd;

        let response = book.process(request);

        if reply.send(response).is_err() {
            debug!("requester dropped before its response was ready");
        }
    }

    info!(resting_orders = book.len(), "engine loop shutting down (engine_rx closed)");
}

/// Cloneable async front to the engine task.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: EngineTx,
}

impl EngineHandle {
    /// Spawn the engine task on the current runtime.
    ///
    /// The task ends once every handle has been dropped.
    pub fn spawn<G>(book: OrderBook<G>, queue_capacity: usize) -> (Self, JoinHandle<()>)
    where
        G: IdGenerator + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(queue_capacity);
        let task = tokio::spawn(run_engine_loop(rx, book));
        (EngineHandle { tx }, task)
    }

    /// Queue a request and wait for the book's response.
    pub async fn request(&self, request: Request) -> Result<Response, EngineError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(EngineCommand { request, reply })
            .await
            .map_err(|_| EngineError::Closed)?;
        response.await.map_err(|_| EngineError::Closed)
    }

    pub async fn submit(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Result<SubmitReport, BookError>, EngineError> {
        let response = self
            .request(Request::Submit {
                side,
                price,
                quantity,
            })
            .await?;
        match response {
            Response::Submitted(report) => Ok(Ok(report)),
            Response::Rejected(err) => Ok(Err(err)),
            _ => Err(EngineError::UnexpectedResponse { request: "submit" }),
        }
    }

    pub async fn cancel(
        &self,
        order_id: OrderId,
        side: Side,
    ) -> Result<Result<Order, BookError>, EngineError> {
        let response = self.request(Request::Cancel { order_id, side }).await?;
        match response {
            Response::Cancelled(order) => Ok(Ok(order)),
            Response::Rejected(err) => Ok(Err(err)),
            _ => Err(EngineError::UnexpectedResponse { request: "cancel" }),
        }
    }

    pub async fn top_of_book(&self) -> Result<TopOfBookSnapshot, EngineError> {
        match self.request(Request::TopOfBook).await? {
            Response::TopOfBook(tob) => Ok(tob),
            _ => Err(EngineError::UnexpectedResponse {
                request: "top_of_book",
            }),
        }
    }

    pub async fn depth(&self, levels: usize) -> Result<DepthSnapshot, EngineError> {
        match self.request(Request::Depth { levels }).await? {
            Response::Depth(depth) => Ok(depth),
            _ => Err(EngineError::UnexpectedResponse { request: "depth" }),
        }
    }
}
