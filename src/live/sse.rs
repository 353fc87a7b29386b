//! Incremental decoder for `text/event-stream` bodies.

/// One dispatched server-sent event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
  pub event: String,
  pub data: String,
  pub id: Option<String>,
}

/// Feeds raw body chunks in, yields complete frames out. Chunk boundaries
/// may fall anywhere, including inside a UTF-8 sequence or a CRLF pair.
#[derive(Debug, Default)]
pub struct SseDecoder {
  buffer: Vec<u8>,
  event: Option<String>,
  data: Vec<String>,
  id: Option<String>,
}

impl SseDecoder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Consume a chunk and return every frame it completes.
  pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
    self.buffer.extend_from_slice(chunk);
    let mut frames = Vec::new();

    while let Some(line) = self.next_line() {
      if let Some(frame) = self.process_line(&line) {
        frames.push(frame);
      }
    }

    frames
  }

  /// Pop the next complete line off the buffer, without its terminator.
  fn next_line(&mut self) -> Option<String> {
    let pos = self.buffer.iter().position(|&b| b == b'\n' || b == b'\r')?;

    // A lone CR at the end of the buffer may be the first half of CRLF
    if self.buffer[pos] == b'\r' && pos + 1 == self.buffer.len() {
      return None;
    }

    let terminator = if self.buffer[pos] == b'\r' && self.buffer[pos + 1] == b'\n' {
      2
    } else {
      1
    };
    let line: Vec<u8> = self.buffer.drain(..pos + terminator).take(pos).collect();
    Some(String::from_utf8_lossy(&line).into_owned())
  }

  fn process_line(&mut self, line: &str) -> Option<SseFrame> {
    if line.is_empty() {
      return self.dispatch();
    }
    if line.starts_with(':') {
      return None; // comment / keep-alive
    }

    let (field, value) = match line.split_once(':') {
      Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
      None => (line, ""),
    };

    match field {
      "event" => self.event = Some(value.to_string()),
      "data" => self.data.push(value.to_string()),
      "id" => self.id = Some(value.to_string()),
      _ => {} // retry and unknown fields
    }
    None
  }

  fn dispatch(&mut self) -> Option<SseFrame> {
    // Frames that name an event are dispatched even without data so
    // signals like `connected` are not lost.
    let event = self.event.take();
    if self.data.is_empty() && event.is_none() {
      return None;
    }
    let data = std::mem::take(&mut self.data).join("\n");
    Some(SseFrame {
      event: event.unwrap_or_else(|| "message".to_string()),
      data,
      id: self.id.clone(),
    })
  }
}
