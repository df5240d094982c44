use lib::protocol::{CommandRequest, ErrorCode, PROTOCOL_VERSION, read_json_frame};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::{
    error::BoxError,
    responses::{send_added, send_ended, send_queue_error, send_reject, send_snapshot},
    state::ServerState,
};

/// Serves operator commands on one connection until the peer hangs up.
pub(crate) async fn handle_connection(
    mut stream: TcpStream,
    state: ServerState,
) -> Result<(), BoxError> {
    let peer = stream.peer_addr()?;
    let connection_id = state.next_connection_id();
    info!("operator connected: {} (connection_id={})", peer, connection_id);

    loop {
        let request = match read_json_frame::<_, CommandRequest>(&mut stream).await {
            Ok(Some(request)) => request,
            Ok(None) => {
                info!(
                    "operator disconnected: {} (connection_id={})",
                    peer, connection_id
                );
                return Ok(());
            }
            Err(err) => {
                warn!("invalid command from {}: {}", peer, err);
                let _ = send_reject(
                    &mut stream,
                    ErrorCode::InvalidRequest,
                    format!("invalid command: {}", err),
                )
                .await;
                return Ok(());
            }
        };

        if request.protocol_version() != PROTOCOL_VERSION {
            warn!(
                "rejected {} from {}: protocol version {}",
                request.kind(),
                peer,
                request.protocol_version()
            );
            send_reject(
                &mut stream,
                ErrorCode::UnsupportedProtocolVersion,
                format!(
                    "server protocol version is {}, got {}",
                    PROTOCOL_VERSION,
                    request.protocol_version()
                ),
            )
            .await?;
            continue;
        }

        debug!(
            "{} command from {} (connection_id={})",
            request.kind(),
            peer,
            connection_id
        );
        match request {
            CommandRequest::Status { .. } => {
                let queue = state.status().await;
                send_snapshot(&mut stream, queue).await?;
            }
            CommandRequest::Add { customer_name, .. } => {
                match state.add_chat(&customer_name).await {
                    Ok(chat) => send_added(&mut stream, chat).await?,
                    Err(err) => send_queue_error(&mut stream, &err).await?,
                }
            }
            CommandRequest::End { .. } => match state.end_chat().await {
                Ok(chat) => send_ended(&mut stream, chat).await?,
                Err(err) => send_queue_error(&mut stream, &err).await?,
            },
        }
    }
}
