use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::source::{decode, DecodedImage, ImageSource};
use super::{AssetError, Result};
use crate::scene::{NodeId, SceneTree};

struct Job {
    node: NodeId,
    source: ImageSource,
}

type Completion = (NodeId, Result<DecodedImage>);

/// A decoded image whose requesting node is still mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub node: NodeId,
    pub image: DecodedImage,
}

/// Decodes images on a background thread.
///
/// Requests are tagged with the node that will display the result. Results
/// are only handed back from [`drain`](Self::drain) on the frame thread, and
/// only for nodes that are still in the tree.
pub struct AssetLoader {
    jobs: Option<Sender<Job>>,
    results: Receiver<Completion>,
    worker: Option<JoinHandle<()>>,
    pending: usize,
}

impl AssetLoader {
    pub fn spawn() -> Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel::<Completion>();

        let worker = std::thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                for job in job_rx {
                    let result = decode(&job.source);
                    if result_tx.send((job.node, result)).is_err() {
                        break;
                    }
                }
                log::debug!("asset loader thread exiting");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            worker: Some(worker),
            pending: 0,
        })
    }

    /// Queue `source` for `node`.
    pub fn request(&mut self, node: NodeId, source: ImageSource) -> Result<()> {
        let jobs = self.jobs.as_ref().ok_or(AssetError::Disconnected)?;
        jobs.send(Job { node, source })
            .map_err(|_| AssetError::Disconnected)?;
        self.pending += 1;
        Ok(())
    }

    /// Requests not yet drained.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Collect every finished load without blocking.
    pub fn drain(&mut self, tree: &SceneTree) -> Vec<LoadedImage> {
        let mut ready = Vec::new();
        while let Ok(completion) = self.results.try_recv() {
            self.accept(completion, tree, &mut ready);
        }
        ready
    }

    /// Block until every pending request finished or `timeout` elapsed.
    pub fn wait(&mut self, tree: &SceneTree, timeout: Duration) -> Vec<LoadedImage> {
        let deadline = Instant::now() + timeout;
        let mut ready = Vec::new();
        while self.pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(completion) => self.accept(completion, tree, &mut ready),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    log::warn!("asset loader stopped with {} request(s) pending", self.pending);
                    self.pending = 0;
                    break;
                }
            }
        }
        ready
    }

    fn accept(&mut self, (node, result): Completion, tree: &SceneTree, ready: &mut Vec<LoadedImage>) {
        self.pending = self.pending.saturating_sub(1);
        if !tree.contains(node) {
            log::debug!("dropping image for unmounted node {:?}", node);
            return;
        }
        match result {
            Ok(image) => ready.push(LoadedImage { node, image }),
            Err(e) => log::warn!("image load failed for {:?}, keeping placeholder: {}", node, e),
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("asset loader thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneNode;
    use std::sync::Arc;

    const ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle cx="5" cy="5" r="4"/></svg>"#;

    fn svg() -> ImageSource {
        ImageSource::SvgBytes(ICON.as_bytes().into())
    }

    #[test]
    fn test_load_delivered_to_live_node() {
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::image("icon", 0.5, 0.5));
        let mut loader = AssetLoader::spawn().expect("spawn loader");

        loader.request(node, svg()).expect("queued");
        assert_eq!(loader.pending(), 1);

        let ready = loader.wait(&tree, Duration::from_secs(10));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].node, node);
        assert_eq!(ready[0].image.width, 20);
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_result_for_unmounted_node_is_dropped() {
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::image("icon", 0.5, 0.5));
        let mut loader = AssetLoader::spawn().expect("spawn loader");

        loader.request(node, svg()).expect("queued");
        tree.remove(node);

        assert!(loader.wait(&tree, Duration::from_secs(10)).is_empty());
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_failure_keeps_placeholder() {
        let mut tree = SceneTree::new();
        let node = tree.insert(SceneNode::image("shot", 1.7, 0.9));
        let mut loader = AssetLoader::spawn().expect("spawn loader");

        loader
            .request(node, ImageSource::Bytes(Arc::from(&b"garbage"[..])))
            .expect("queued");
        assert!(loader.wait(&tree, Duration::from_secs(10)).is_empty());
        assert_eq!(loader.pending(), 0);
    }
}
