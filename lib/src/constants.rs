/// Port the operator command listener binds by default.
pub const DEFAULT_COMMAND_PORT: u16 = 7410;
/// Port the HTTP status API binds by default.
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Maximum number of concurrently active chats.
pub const DEFAULT_CAPACITY: usize = 10;

pub const DEFAULT_AGENTS: [&str; 5] = [
    "Agent Alice",
    "Agent Bob",
    "Agent Charlie",
    "Agent Diana",
    "Agent Eve",
];

pub const MAX_NAME_LEN: usize = 128;

/// Local time, captured once when a chat is admitted.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
