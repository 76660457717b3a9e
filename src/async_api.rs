use crate::{Error, Figure, ImageOptions, ImageStream, Result};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Render(Box<Figure>, ImageOptions, oneshot::Sender<Result<Vec<u8>>>),
    RenderToFile(
        Box<Figure>,
        ImageOptions,
        PathBuf,
        oneshot::Sender<Result<()>>,
    ),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly render facade backed by a dedicated worker thread.
///
/// The worker thread executes the blocking render pipeline and replies over
/// oneshot channels, so async tasks never block on browser work. Each render
/// command still launches its own browser process; the worker serializes
/// calls on one handle, and cloned handles share the same worker.
#[derive(Clone)]
pub struct Renderer {
    cmd_tx: Sender<Command>,
}

impl Renderer {
    /// Spawn the worker thread backing this facade.
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Render(figure, opts, resp) => {
                        let res = crate::render_png(&figure, &opts);
                        let _ = resp.send(res);
                    }
                    Command::RenderToFile(figure, opts, path, resp) => {
                        let res = crate::render_png_to_file(&figure, &opts, &path);
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    /// Render `figure` to PNG bytes.
    pub async fn render_png(&self, figure: Figure, opts: ImageOptions) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Render(Box::new(figure), opts, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Render canceled: {}", e)))?
    }

    /// Render `figure` and wrap the PNG bytes in a one-shot [`ImageStream`].
    pub async fn render_png_stream(
        &self,
        figure: Figure,
        opts: ImageOptions,
    ) -> Result<ImageStream> {
        self.render_png(figure, opts).await.map(ImageStream::new)
    }

    /// Render `figure` and write the PNG to `path`.
    pub async fn render_png_to_file(
        &self,
        figure: Figure,
        opts: ImageOptions,
        path: impl Into<PathBuf>,
    ) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::RenderToFile(Box::new(figure), opts, path.into(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("RenderToFile canceled: {}", e)))?
    }

    /// Shut down the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
