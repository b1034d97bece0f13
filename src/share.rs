//! Copying share links to the system clipboard
//!
//! On X11 and Wayland the copied text is served by whoever owns the
//! selection, so the handle that set it has to outlive the copy. It lives on
//! a dedicated thread for the whole session.

use std::sync::mpsc;

use anyhow::{Context, Result, anyhow};

pub trait Clipboard: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<()>;
}

/// Something that can hold clipboard text.
trait TextSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

impl TextSink for arboard::Clipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        arboard::Clipboard::set_text(self, text)?;
        Ok(())
    }
}

type CopyRequest = (String, mpsc::Sender<Result<()>>);

/// The desktop clipboard, owned by the "clipboard" thread. The thread exits
/// when this handle is dropped.
pub struct SystemClipboard {
    requests: mpsc::Sender<CopyRequest>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Self::spawn(|| arboard::Clipboard::new().context("failed to open the system clipboard"))
    }

    /// `open` runs on the clipboard thread, lazily, until it succeeds once.
    fn spawn<S, F>(mut open: F) -> Result<Self>
    where
        S: TextSink,
        F: FnMut() -> Result<S> + Send + 'static,
    {
        let (requests, incoming) = mpsc::channel::<CopyRequest>();

        std::thread::Builder::new()
            .name("clipboard".to_string())
            .spawn(move || {
                let mut handle: Option<S> = None;
                for (text, reply) in incoming {
                    let sink = match handle.take() {
                        Some(sink) => Ok(sink),
                        None => open(),
                    };
                    let result = match sink {
                        Ok(mut sink) => {
                            let result = sink.set_text(text);
                            handle = Some(sink);
                            result
                        }
                        Err(e) => Err(e),
                    };
                    let _ = reply.send(result);
                }
                tracing::debug!("Clipboard thread shutting down");
            })
            .context("failed to spawn clipboard thread")?;

        Ok(Self { requests })
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<()> {
        let (reply, result) = mpsc::channel();
        self.requests
            .send((text.to_string(), reply))
            .map_err(|_| anyhow!("clipboard thread has stopped"))?;
        result.recv().context("clipboard thread has stopped")?
    }
}

/// Text shown in the share toast, shortened to `max` characters.
pub fn toast_preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}…", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Board {
        opens: Arc<Mutex<usize>>,
        text: Arc<Mutex<Option<String>>>,
    }

    struct BoardHandle(Board);

    impl TextSink for BoardHandle {
        fn set_text(&mut self, text: String) -> Result<()> {
            *self.0.text.lock().unwrap() = Some(text);
            Ok(())
        }
    }

    #[test]
    fn one_handle_serves_every_copy() {
        let board = Board::default();
        let opener = board.clone();
        let clipboard = SystemClipboard::spawn(move || {
            *opener.opens.lock().unwrap() += 1;
            Ok(BoardHandle(opener.clone()))
        })
        .unwrap();

        clipboard.copy_text("https://share/1").unwrap();
        clipboard.copy_text("https://share/2").unwrap();

        assert_eq!(*board.opens.lock().unwrap(), 1);
        assert_eq!(board.text.lock().unwrap().as_deref(), Some("https://share/2"));
    }

    #[test]
    fn failed_open_is_retried_on_the_next_copy() {
        let attempts = Arc::new(Mutex::new(0));
        let board = Board::default();
        let (counter, opener) = (attempts.clone(), board.clone());
        let clipboard = SystemClipboard::spawn(move || {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n == 1 {
                anyhow::bail!("no display");
            }
            Ok(BoardHandle(opener.clone()))
        })
        .unwrap();

        assert!(clipboard.copy_text("first").is_err());
        clipboard.copy_text("second").unwrap();
        assert_eq!(*attempts.lock().unwrap(), 2);
        assert_eq!(board.text.lock().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn long_links_are_shortened() {
        assert_eq!(toast_preview("abc", 5), "abc");
        assert_eq!(toast_preview("abcdefgh", 5), "abcde…");
    }
}
