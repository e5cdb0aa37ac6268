use crate::error::{DecodeError, TransportError};
use rosc::{OscMessage, OscPacket, OscType};
use show_core::CueEvent;

/// Decode one UDP datagram into cue events.
///
/// Bundles are flattened in order. A packet containing any message that
/// needs a cue id but lacks a usable one is rejected as a whole.
pub fn decode_packet(bytes: &[u8]) -> Result<Vec<CueEvent>, DecodeError> {
	let (_, packet) = rosc::decoder::decode_udp(bytes).map_err(|e| DecodeError::Malformed(format!("{e:?}")))?;

	let mut messages = Vec::new();
	flatten(packet, &mut messages);
	messages.into_iter().map(to_event).collect()
}

fn flatten(packet: OscPacket, out: &mut Vec<OscMessage>) {
	match packet {
		OscPacket::Message(message) => out.push(message),
		OscPacket::Bundle(bundle) => {
			for inner in bundle.content {
				flatten(inner, out);
			}
		}
	}
}

/// Map one OSC message to a cue event by address
pub fn to_event(message: OscMessage) -> Result<CueEvent, DecodeError> {
	let event = match message.addr.as_str() {
		"/start" => CueEvent::start(cue_id(&message)?),
		"/pause" => CueEvent::Pause,
		"/resume" => CueEvent::Resume,
		"/stop" => CueEvent::Stop,
		"/warning" => CueEvent::warning(cue_id(&message)?),
		"/danger" => CueEvent::danger(cue_id(&message)?),
		_ => CueEvent::Unrecognized {
			args: message.args.iter().map(describe).collect(),
			address: message.addr,
		},
	};
	Ok(event)
}

/// First argument as a cue id; numeric ids are stringified
fn cue_id(message: &OscMessage) -> Result<String, DecodeError> {
	let arg = message.args.first().ok_or_else(|| DecodeError::MissingCueId {
		address: message.addr.clone(),
	})?;

	let id = match arg {
		OscType::String(s) => s.trim().to_string(),
		OscType::Int(i) => i.to_string(),
		OscType::Long(l) => l.to_string(),
		OscType::Float(f) if f.is_finite() => f.to_string(),
		OscType::Double(d) if d.is_finite() => d.to_string(),
		other => {
			return Err(DecodeError::InvalidCueId {
				address: message.addr.clone(),
				arg: describe(other),
			})
		}
	};

	if id.is_empty() {
		return Err(DecodeError::MissingCueId {
			address: message.addr.clone(),
		});
	}
	Ok(id)
}

fn describe(arg: &OscType) -> String {
	match arg {
		OscType::String(s) => s.clone(),
		OscType::Int(i) => i.to_string(),
		OscType::Long(l) => l.to_string(),
		OscType::Float(f) => f.to_string(),
		OscType::Double(d) => d.to_string(),
		OscType::Bool(b) => b.to_string(),
		OscType::Char(c) => c.to_string(),
		other => format!("{other:?}"),
	}
}

/// Encode a single message as an OSC datagram
pub fn encode_message(address: &str, args: Vec<OscType>) -> Result<Vec<u8>, TransportError> {
	let packet = OscPacket::Message(OscMessage { addr: address.to_string(), args });
	rosc::encoder::encode(&packet).map_err(|e| TransportError::Encode(format!("{e:?}")))
}
