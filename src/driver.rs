//! Sequential playback: classify, compose, hand off, in order.

use crate::error::{ReplayError, Result};
use crate::frame::FrameSequence;
use crate::role::RoleClassifier;
use crate::scene::{Scene, SceneComposer};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A shared stop signal, checked between frames. Playback never interrupts a
/// frame mid-composition.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Create a flag set to run.
    pub fn new() -> Self {
        RunFlag(Arc::new(AtomicBool::new(true)))
    }

    /// Return true if playback should continue.
    pub fn should_run(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Command playback to stop before the next frame.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// The external drawing/encoding backend.
///
/// The driver hands over one scene at a time in strictly increasing order
/// and never retains a scene after the call returns. Failures are surfaced
/// to the caller as [`ReplayError::RenderExport`], uninterpreted.
pub trait Renderer {
    /// Called once before the first scene with the inter-frame interval
    /// hint. The core does not interpret the interval.
    fn begin(&mut self, _interval: Duration) -> anyhow::Result<()> {
        Ok(())
    }

    /// Draw one scene.
    fn draw(&mut self, scene: &Scene) -> anyhow::Result<()>;

    /// Encode/export whatever was drawn. Called exactly once, after the last
    /// scene; skipped if playback was cancelled.
    fn finish(&mut self) -> anyhow::Result<()>;
}

/// Drives a full replay through the classifier and composer into a renderer.
pub struct AnimationDriver {
    interval: Duration,
    run_flag: RunFlag,
}

impl AnimationDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run_flag: RunFlag::new(),
        }
    }

    /// Handle used to cancel playback from elsewhere.
    pub fn run_flag(&self) -> RunFlag {
        self.run_flag.clone()
    }

    /// Play the whole timeline, one scene at a time.
    ///
    /// Emits scenes for steps `0..=num_batches` (flooding) or frames `0..F`
    /// (mobility), then signals completion to the renderer. Does not loop.
    pub fn play(
        &self,
        frames: &FrameSequence,
        classifier: &RoleClassifier,
        composer: &SceneComposer,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        if frames.is_empty() {
            info!("no frames to replay");
            return renderer.finish().map_err(ReplayError::RenderExport);
        }

        renderer
            .begin(self.interval)
            .map_err(ReplayError::RenderExport)?;

        let num_steps = classifier.num_steps(frames.len());
        for step in 0..num_steps {
            if !self.run_flag.should_run() {
                info!("playback cancelled before step {step}");
                return Ok(());
            }
            let frame = frames.frame(classifier.frame_for_step(step));
            let roles = classifier.classify(step);
            let scene = composer.compose(&frame, step, &roles);
            renderer.draw(&scene).map_err(ReplayError::RenderExport)?;
        }

        renderer.finish().map_err(ReplayError::RenderExport)?;
        info!("emitted {num_steps} scenes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Device, DeviceId, Position};
    use crate::role::RoleConfig;
    use crate::scene::ComposerOptions;
    use crate::store::TrajectoryStore;
    use anyhow::anyhow;

    #[derive(Default)]
    struct RecordingRenderer {
        interval: Option<Duration>,
        scenes: Vec<Scene>,
        finished: bool,
    }

    impl Renderer for RecordingRenderer {
        fn begin(&mut self, interval: Duration) -> anyhow::Result<()> {
            self.interval = Some(interval);
            Ok(())
        }

        fn draw(&mut self, scene: &Scene) -> anyhow::Result<()> {
            self.scenes.push(scene.clone());
            Ok(())
        }

        fn finish(&mut self) -> anyhow::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn draw(&mut self, _scene: &Scene) -> anyhow::Result<()> {
            Err(anyhow!("disk full"))
        }

        fn finish(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn mkstore(num_devices: usize, num_frames: usize) -> TrajectoryStore {
        let devices = (0..num_devices)
            .map(|i| {
                let trajectory = (0..num_frames)
                    .map(|f| Position::new(i as f64, f as f64))
                    .collect();
                Device::new(DeviceId(i), trajectory)
            })
            .collect();
        TrajectoryStore::from_devices(devices).unwrap()
    }

    fn mkcomposer(classifier: &RoleClassifier) -> SceneComposer {
        SceneComposer::new(ComposerOptions::default(), &classifier.roles())
    }

    #[test]
    fn hierarchical_playback_emits_one_scene_per_frame() {
        let store = mkstore(3, 4);
        let frames = FrameSequence::new(&store);
        let classifier = RoleClassifier::new(
            RoleConfig::Hierarchical {
                target: DeviceId(0),
                neighbors: vec![DeviceId(1)],
                mprs: vec![DeviceId(2)],
                two_hop: vec![Vec::new()],
            },
            3,
        )
        .unwrap();
        let composer = mkcomposer(&classifier);
        let driver = AnimationDriver::new(Duration::from_millis(200));

        let mut renderer = RecordingRenderer::default();
        driver
            .play(&frames, &classifier, &composer, &mut renderer)
            .unwrap();

        assert_eq!(renderer.interval, Some(Duration::from_millis(200)));
        assert_eq!(renderer.scenes.len(), 4);
        assert!(renderer.finished);
        let indices: Vec<usize> = renderer.scenes.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn progressive_playback_emits_batches_plus_one_scenes() {
        let store = mkstore(3, 2);
        let frames = FrameSequence::new(&store);
        let classifier = RoleClassifier::new(
            RoleConfig::Progressive {
                origin: vec![DeviceId(0)],
                batches: vec![vec![DeviceId(1)], vec![DeviceId(2)]],
            },
            3,
        )
        .unwrap();
        let composer = mkcomposer(&classifier);
        let driver = AnimationDriver::new(Duration::from_millis(600));

        let mut renderer = RecordingRenderer::default();
        driver
            .play(&frames, &classifier, &composer, &mut renderer)
            .unwrap();

        assert_eq!(renderer.scenes.len(), 3);
        // Flooding scenes anchor positions on the first frame.
        for scene in &renderer.scenes {
            assert_eq!(scene.markers[0].position, Position::new(0.0, 0.0));
        }
    }

    #[test]
    fn cancellation_stops_before_the_next_frame() {
        let store = mkstore(1, 5);
        let frames = FrameSequence::new(&store);
        let classifier = RoleClassifier::new(
            RoleConfig::Hierarchical {
                target: DeviceId(0),
                neighbors: Vec::new(),
                mprs: Vec::new(),
                two_hop: Vec::new(),
            },
            1,
        )
        .unwrap();
        let composer = mkcomposer(&classifier);
        let driver = AnimationDriver::new(Duration::from_millis(100));
        driver.run_flag().stop();

        let mut renderer = RecordingRenderer::default();
        driver
            .play(&frames, &classifier, &composer, &mut renderer)
            .unwrap();

        assert!(renderer.scenes.is_empty());
        assert!(!renderer.finished);
    }

    #[test]
    fn renderer_failure_surfaces_as_render_export() {
        let store = mkstore(1, 1);
        let frames = FrameSequence::new(&store);
        let classifier = RoleClassifier::new(
            RoleConfig::Hierarchical {
                target: DeviceId(0),
                neighbors: Vec::new(),
                mprs: Vec::new(),
                two_hop: Vec::new(),
            },
            1,
        )
        .unwrap();
        let composer = mkcomposer(&classifier);
        let driver = AnimationDriver::new(Duration::from_millis(100));

        let err = driver
            .play(&frames, &classifier, &composer, &mut FailingRenderer)
            .unwrap_err();
        assert!(matches!(err, ReplayError::RenderExport(_)));
    }

    #[test]
    fn empty_store_completes_without_scenes() {
        let store = TrajectoryStore::from_devices(Vec::new()).unwrap();
        let frames = FrameSequence::new(&store);
        let classifier = RoleClassifier::new(
            RoleConfig::Progressive {
                origin: Vec::new(),
                batches: Vec::new(),
            },
            0,
        )
        .unwrap();
        let composer = mkcomposer(&classifier);
        let driver = AnimationDriver::new(Duration::from_millis(100));

        let mut renderer = RecordingRenderer::default();
        driver
            .play(&frames, &classifier, &composer, &mut renderer)
            .unwrap();
        assert!(renderer.scenes.is_empty());
        assert!(renderer.finished);
    }
}
