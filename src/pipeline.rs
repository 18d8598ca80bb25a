use crate::actuator::SerialLink;
use crate::camera::{CameraConfig, CameraSystem};
use crate::classifier::ImageClassifier;
use crate::commands::CommandSequencer;
use crate::config::SortArmConfig;
use crate::labels::LabelStore;
use crate::voting::{ConfidenceGate, VoteBuffer};
use anyhow::{anyhow, Result};
use std::time::Instant;
use tracing::{debug, error, info};

/// Owns every piece of hardware state for one run: camera, model, serial
/// link, and the vote window. Dropping the pipeline releases the camera
/// stream and the serial port on every exit path.
pub struct SortPipeline {
    camera: CameraSystem,
    classifier: ImageClassifier,
    labels: LabelStore,
    gate: ConfidenceGate,
    votes: VoteBuffer,
    sequencer: CommandSequencer,
}

impl SortPipeline {
    pub async fn new(
        config: SortArmConfig,
        camera_device: u32,
        model_path: &str,
        labels_path: &str,
    ) -> Result<Self> {
        info!("Initializing sorting pipeline");

        let classifier = ImageClassifier::load(model_path)?;
        let labels = LabelStore::load(labels_path)?;
        info!("Loaded {} labels from {}", labels.len(), labels_path);

        let camera_config = CameraConfig {
            camera_id: camera_device,
            width: config.vision.width,
            height: config.vision.height,
            fps: config.vision.fps,
        };
        let mut camera = CameraSystem::new(camera_config)?;
        camera.initialize().await?;

        let link = SerialLink::open(&config.serial)?;
        let sequencer = CommandSequencer::new(link);

        let gate = ConfidenceGate::new(
            config.classifier.confidence_threshold,
            config.classifier.fallback_label_id,
        );
        let votes = VoteBuffer::new(config.vote.window);

        info!("Pipeline initialization complete");

        Ok(Self {
            camera,
            classifier,
            labels,
            gate,
            votes,
            sequencer,
        })
    }

    /// The capture/classify/vote/act loop. Classification and actuation run
    /// sequentially on this task; a multi-second sort routine blocks further
    /// capture by design. Runs until the process is interrupted or a serial
    /// write fails.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting main processing loop");

        let mut frame_count: u64 = 0;
        let mut last_stats_time = Instant::now();

        loop {
            match self.process_single_frame().await {
                Ok(decision) => {
                    if let Some(winner) = decision {
                        // A serial failure mid-sequence is fatal; everything
                        // else about the trigger is consumed here.
                        let acted = self.sequencer.run_for_label(winner).await?;
                        if acted {
                            info!("Sorted object classified as '{}'", self.labels.name(winner));
                        }
                        self.votes.reset();
                    }

                    frame_count += 1;
                    if frame_count % 100 == 0 {
                        let elapsed = last_stats_time.elapsed();
                        let fps = 100.0 / elapsed.as_secs_f32();
                        info!("Processed {} frames, current FPS: {:.2}", frame_count, fps);
                        last_stats_time = Instant::now();
                    }
                }
                Err(e) => {
                    error!("Frame processing error: {}", e);
                    // Continue processing despite errors
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Capture and classify one frame, record the vote, and report the
    /// winning label when the window becomes unanimous.
    async fn process_single_frame(&mut self) -> Result<Option<usize>> {
        let frame = self.camera.capture_frame().await?;

        let started = Instant::now();
        let results = self.classifier.classify(&frame, 1)?;
        let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;

        let best = results
            .first()
            .ok_or_else(|| anyhow!("Classifier returned no results"))?;
        debug!(
            "Classified as '{}' ({:.2}) in {:.1}ms",
            self.labels.name(best.label_id),
            best.confidence,
            elapsed_ms
        );

        let effective = self.gate.effective_label(best.label_id, best.confidence);
        if effective != best.label_id {
            debug!(
                "Low confidence ({:.2}), recording fallback label {}",
                best.confidence, effective
            );
        }

        self.votes.record(effective);
        Ok(self.votes.unanimous_label())
    }
}
