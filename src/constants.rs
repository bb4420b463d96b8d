//! Global constants for esmon
//!
//! Centralized location for application-wide constants

use std::time::Duration;

/// Path to the Endpoint Security event collaborator spawned in live mode
pub const ESLOGGER_PATH: &str = "/usr/bin/eslogger";

/// Capacity of the bounded delivery queue between the event reader and the
/// renderer. A full queue counts the overflowing event as dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 1024;

/// Interval at which the live session samples the dropped-event counter
pub const DROP_SAMPLE_INTERVAL: Duration = Duration::from_secs(2);

/// Event type names accepted by `eslogger`, as reported by
/// `eslogger --list-events`. Requested names outside this set are ignored
/// with a warning; if none remain the subscription is rejected.
pub const SUBSCRIBABLE_EVENTS: &[&str] = &[
    "access",
    "authentication",
    "btm_launch_item_add",
    "btm_launch_item_remove",
    "chdir",
    "chroot",
    "clone",
    "close",
    "copyfile",
    "create",
    "cs_invalidated",
    "deleteextattr",
    "dup",
    "exchangedata",
    "exec",
    "exit",
    "fcntl",
    "file_provider_materialize",
    "file_provider_update",
    "fork",
    "fsgetpath",
    "get_task",
    "get_task_inspect",
    "get_task_name",
    "get_task_read",
    "getattrlist",
    "getextattr",
    "iokit_open",
    "kextload",
    "kextunload",
    "link",
    "listextattr",
    "login_login",
    "login_logout",
    "lookup",
    "lw_session_lock",
    "lw_session_login",
    "lw_session_logout",
    "lw_session_unlock",
    "mmap",
    "mount",
    "mprotect",
    "open",
    "openssh_login",
    "openssh_logout",
    "proc_check",
    "proc_suspend_resume",
    "pty_close",
    "pty_grant",
    "readdir",
    "readlink",
    "remote_thread_create",
    "remount",
    "rename",
    "searchfs",
    "setacl",
    "setattrlist",
    "setegid",
    "seteuid",
    "setextattr",
    "setflags",
    "setgid",
    "setmode",
    "setowner",
    "setregid",
    "setreuid",
    "settime",
    "setuid",
    "signal",
    "stat",
    "su",
    "sudo",
    "trace",
    "truncate",
    "uipc_bind",
    "uipc_connect",
    "unlink",
    "unmount",
    "utimes",
    "write",
    "xp_malware_detected",
    "xp_malware_remediated",
];
