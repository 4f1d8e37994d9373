//! The single current artifact.

use log::debug;

use crate::config::PixelSize;
use crate::render::RenderRequest;
use crate::validate::Content;

/// A rendered symbol bound to the request that produced it.
#[derive(Debug)]
pub struct Artifact<H> {
    request: RenderRequest,
    handle: H,
}

impl<H> Artifact<H> {
    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn content(&self) -> &Content {
        self.request.content()
    }

    pub fn size(&self) -> PixelSize {
        self.request.size()
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

/// Holds at most one artifact and owns its handle.
#[derive(Debug)]
pub struct ArtifactStore<H> {
    current: Option<Artifact<H>>,
}

impl<H> Default for ArtifactStore<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H> ArtifactStore<H> {
    /// Replaces the current artifact. The previous handle is dropped before the new one is
    /// stored.
    pub fn set(&mut self, request: RenderRequest, handle: H) {
        self.release();
        self.current = Some(Artifact { request, handle });
    }

    pub fn current(&self) -> Option<&Artifact<H>> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.release();
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    fn release(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(
                "releasing artifact ({} characters at {})",
                previous.content().char_len(),
                previous.size()
            );
        }
    }
}
