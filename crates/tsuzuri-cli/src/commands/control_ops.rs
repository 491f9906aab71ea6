use std::path::PathBuf;
use std::process;

use tsuzuri::control::{self, send_request, ControlReply, ControlRequest};

/// Ask a running input method to perform `action` on `seat`.
pub fn action_cmd(seat: &str, action: &str, socket: Option<&str>) {
    let path = match socket {
        Some(path) => PathBuf::from(path),
        None => control::socket_path().unwrap_or_else(|| {
            eprintln!("Error: XDG_RUNTIME_DIR is not set; pass --socket");
            process::exit(1);
        }),
    };
    let request = ControlRequest {
        seat: seat.to_string(),
        action: action.to_string(),
    };
    let reply = die!(
        send_request(&path, &request),
        "Error talking to {}: {}",
        path.display()
    );
    match reply {
        ControlReply::Ok => println!("ok"),
        ControlReply::NoSuchSeat { seat } => {
            eprintln!("Error: no such seat: {seat}");
            process::exit(1);
        }
        ControlReply::InvalidParameter { parameter } => {
            eprintln!("Error: invalid {parameter}: {action}");
            process::exit(1);
        }
        ControlReply::Malformed { message } => {
            eprintln!("Error: request rejected: {message}");
            process::exit(1);
        }
    }
}
