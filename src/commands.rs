use crate::actuator::SerialLink;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// One servo command line and the pause that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStep {
    pub line: String,
    pub pause: Duration,
}

impl SequenceStep {
    fn new(line: impl Into<String>, pause: Duration) -> Self {
        Self {
            line: line.into(),
            pause,
        }
    }
}

const STEP_PAUSE: Duration = Duration::from_millis(500);
const RELEASE_PAUSE: Duration = Duration::from_secs(2);

/// Trigger label id -> target angle for the base servo. Labels missing from
/// this table produce no arm motion.
const SORT_TARGETS: &[(usize, u32)] = &[(0, 70), (2, 110)];

/// The fixed pick-and-drop choreography for one trigger label, or `None`
/// when the label is not sorted.
pub fn routine_for_label(label_id: usize) -> Option<Vec<SequenceStep>> {
    let (_, angle) = SORT_TARGETS.iter().find(|(id, _)| *id == label_id)?;
    Some(sort_routine(*angle))
}

/// Lower the gripper over the object, grab it, swing the base to the target
/// bin, release, and return home. The gripper (`B90`) needs the long pause
/// to finish opening before the arm moves away.
fn sort_routine(target_angle: u32) -> Vec<SequenceStep> {
    vec![
        SequenceStep::new("A0", STEP_PAUSE),
        SequenceStep::new("C105", STEP_PAUSE),
        SequenceStep::new("D55", STEP_PAUSE),
        SequenceStep::new("B150", STEP_PAUSE),
        SequenceStep::new("C140", STEP_PAUSE),
        SequenceStep::new("D0", STEP_PAUSE),
        SequenceStep::new(format!("A{}", target_angle), STEP_PAUSE),
        SequenceStep::new("B90", RELEASE_PAUSE),
        SequenceStep::new("A90", STEP_PAUSE),
    ]
}

/// Plays command sequences to the servo controller. Pure choreography: no
/// acknowledgment, no retry, no response parsing.
pub struct CommandSequencer {
    link: SerialLink,
}

impl CommandSequencer {
    pub fn new(link: SerialLink) -> Self {
        Self { link }
    }

    /// Run the routine mapped to `label_id`, returning whether one ran.
    /// Blocks the caller for the whole sequence, pauses included.
    pub async fn run_for_label(&mut self, label_id: usize) -> Result<bool> {
        let Some(routine) = routine_for_label(label_id) else {
            debug!("No sort routine mapped for label {}", label_id);
            return Ok(false);
        };

        info!(
            "Running sort routine for label {} ({} steps)",
            label_id,
            routine.len()
        );

        for step in &routine {
            self.link.send(&step.line)?;
            sleep(step.pause).await;
        }

        Ok(true)
    }
}
