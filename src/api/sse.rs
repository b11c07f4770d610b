//! `GET /events` - SSE stream of newly ingested SMS

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
};
use futures::StreamExt;

use crate::fanout::Frame;
use crate::service::SmsService;

fn to_sse_event(frame: Frame) -> Event {
    match frame {
        Frame::Data(payload) => Event::default().data(&*payload),
        Frame::KeepAlive => Event::default().comment(Frame::keepalive_comment()),
    }
}

/// Register a subscriber and stream its mailbox.
///
/// Registration happens before the response is returned, so any SMS posted
/// after this handler completes reaches the new client. The subscriber is
/// removed when the stream ends or the client goes away.
pub async fn events_handler(State(service): State<Arc<SmsService>>) -> Response {
    let pump = match service.subscribe() {
        Ok(pump) => pump,
        Err(e) => return e.into_response(),
    };

    let stream = pump
        .into_stream()
        .map(|frame| Ok::<_, Infallible>(to_sse_event(frame)));

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(stream),
    )
        .into_response()
}
