use lpmsg_frame::Message;

use crate::cmd::{resolve_payload, EncodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_report, FrameReport, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let message = Message::from(resolve_payload(&args.payload)?);
    let wire = message
        .encode()
        .map_err(|err| frame_error("encode failed", err))?;

    print_report(&FrameReport::encoded(message.text(), &wire), format);
    Ok(SUCCESS)
}
