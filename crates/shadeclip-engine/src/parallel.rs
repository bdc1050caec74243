//! Parallel batch copies using rayon.
//!
//! Each job is still copied sequentially; only independent jobs run
//! concurrently.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;
use shadeclip_common::SceneGraph;

use crate::pipeline::{copy_network, CopyOptions, CopyOutput};
use crate::Result;

/// One independent copy.
#[derive(Debug, Clone)]
pub struct CopyJob<'a, S: ?Sized> {
    /// Scene to copy from.
    pub scene: &'a S,
    /// Roots copied into one document.
    pub roots: Vec<String>,
}

impl<'a, S: ?Sized> CopyJob<'a, S> {
    /// Create a job.
    pub fn new(scene: &'a S, roots: Vec<String>) -> Self {
        Self { scene, roots }
    }
}

/// Run copy jobs in parallel.
///
/// Results are returned in job order. The progress callback receives
/// (completed, total) counts.
pub fn copy_batch<S, F>(jobs: &[CopyJob<'_, S>], options: &CopyOptions, mut progress: F) -> Vec<Result<CopyOutput>>
where
    S: SceneGraph + Sync + ?Sized,
    F: FnMut(usize, usize) + Send,
{
    let total = jobs.len();
    let done = AtomicUsize::new(0);
    let progress = Mutex::new(&mut progress);

    jobs.par_iter()
        .map(|job| {
            let result = copy_network(job.scene, &job.roots, options);
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            let mut report = progress.lock();
            (*report)(completed, total);
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use shadeclip_common::{MemoryScene, ShadingNode};

    use super::*;

    #[test]
    fn test_copy_batch_keeps_job_order() {
        let scene = MemoryScene::from_nodes([
            ShadingNode::new("SG1", "shadingEngine").input("surfaceShader", "std1", "outColor"),
            ShadingNode::new("std1", "aiStandard"),
            ShadingNode::new("n1", "aiNoise"),
        ])
        .unwrap();

        let jobs = vec![
            CopyJob::new(&scene, vec!["SG1".to_string()]),
            CopyJob::new(&scene, vec!["missing".to_string()]),
            CopyJob::new(&scene, vec!["n1".to_string()]),
        ];

        let mut calls = 0;
        let results = copy_batch(&jobs, &CopyOptions::default(), |_, total| {
            assert_eq!(total, 3);
            calls += 1;
        });

        assert_eq!(calls, 3);
        assert_eq!(results[0].as_ref().unwrap().document.group, "SG1");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().document.nodes.len(), 1);
    }
}
