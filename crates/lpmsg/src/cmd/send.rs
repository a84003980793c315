use lpmsg_frame::{FrameConfig, Message};
use lpmsg_transport::{Destination, UdpConfig};
use tracing::info;

use crate::cmd::{parse_duration, resolve_payload, SendArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_report, FrameReport, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let udp_config = UdpConfig {
        write_timeout: args
            .write_timeout
            .as_deref()
            .map(parse_duration)
            .transpose()?,
    };
    let destination = Destination::new(args.host, args.port);
    let message = Message::from(resolve_payload(&args.payload)?);

    let frame = lpmsg::send_frame(&destination, &message, &FrameConfig::default(), &udp_config)
        .map_err(|err| frame_error("send failed", err))?;

    info!(%destination, bytes = frame.len(), "datagram sent");

    let report =
        FrameReport::encoded(message.text(), &frame).sent(destination.to_string(), frame.len());
    print_report(&report, format);

    Ok(SUCCESS)
}
