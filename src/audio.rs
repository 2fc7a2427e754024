use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use rodio::Source;
use tokio::sync::oneshot;

static STOP: AtomicBool = AtomicBool::new(false);

/// Play `bytes` on a loop from a dedicated thread until [`stop_music`] is called.
///
/// The returned receiver resolves once the output device is open and playback
/// has started, or with the reason it could not.
pub fn spawn_loop(bytes: Vec<u8>, volume: f32) -> oneshot::Receiver<Result<(), String>> {
    let (started_tx, started_rx) = oneshot::channel();
    STOP.store(false, Ordering::SeqCst);
    thread::spawn(move || {
        let (_stream, handle) = match rodio::OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                let _ = started_tx.send(Err(err.to_string()));
                return;
            }
        };
        let sink = match rodio::Sink::try_new(&handle) {
            Ok(sink) => sink,
            Err(err) => {
                let _ = started_tx.send(Err(err.to_string()));
                return;
            }
        };
        let source = match rodio::Decoder::new(Cursor::new(bytes)) {
            Ok(source) => source,
            Err(err) => {
                let _ = started_tx.send(Err(err.to_string()));
                return;
            }
        };
        sink.set_volume(volume);
        sink.append(source.repeat_infinite());
        let _ = started_tx.send(Ok(()));
        while !STOP.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(100));
        }
        sink.stop();
    });
    started_rx
}

pub fn stop_music() {
    STOP.store(true, Ordering::SeqCst);
}
