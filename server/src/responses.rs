use lib::{
    protocol::{
        CommandResponse, ENDED_MESSAGE, ErrorCode, ProtocolError, added_message, error_message,
        write_json_frame,
    },
    queue::{ChatSession, QueueError, QueueStatus},
};
use tokio::net::TcpStream;

pub(crate) async fn send_added(
    stream: &mut TcpStream,
    chat: ChatSession,
) -> Result<(), ProtocolError> {
    let response = CommandResponse::accepted(added_message(&chat), Some(chat));
    write_json_frame(stream, &response).await
}

pub(crate) async fn send_ended(
    stream: &mut TcpStream,
    chat: ChatSession,
) -> Result<(), ProtocolError> {
    let response = CommandResponse::accepted(ENDED_MESSAGE, Some(chat));
    write_json_frame(stream, &response).await
}

pub(crate) async fn send_snapshot(
    stream: &mut TcpStream,
    queue: QueueStatus,
) -> Result<(), ProtocolError> {
    write_json_frame(stream, &CommandResponse::snapshot(queue)).await
}

pub(crate) async fn send_queue_error(
    stream: &mut TcpStream,
    err: &QueueError,
) -> Result<(), ProtocolError> {
    send_reject(stream, ErrorCode::from(err), error_message(err)).await
}

pub(crate) async fn send_reject(
    stream: &mut TcpStream,
    code: ErrorCode,
    message: impl Into<String>,
) -> Result<(), ProtocolError> {
    write_json_frame(stream, &CommandResponse::rejected(code, message)).await
}
