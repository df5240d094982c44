mod command;
mod framing;

pub use command::{
    CommandAccepted, CommandKind, CommandRejected, CommandRequest, CommandResponse,
    ENDED_MESSAGE, ErrorCode, PROTOCOL_VERSION, StatusSnapshot, added_message, error_message,
};
pub use framing::{
    MAX_FRAME_BYTES, ProtocolError, read_bytes_frame, read_json_frame, write_bytes_frame,
    write_json_frame,
};
