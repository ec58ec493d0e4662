use std::time::Instant;

use crate::core::{normalize, Dataset, RandomSource, Round, SetupError};

// ---------------------------------------------------------------------------
// pick — uniform sampling with replacement
// ---------------------------------------------------------------------------

/// Draws a fresh round numbered `number` from `dataset`.
///
/// Items may repeat across rounds. Ground truth is normalized here, once.
pub fn pick(
    dataset: &Dataset,
    random: &mut dyn RandomSource,
    number: u32,
    now: Instant,
) -> Result<Round, SetupError> {
    if dataset.is_empty() {
        return Err(SetupError::EmptyDataset);
    }

    let index = random.pick_index(dataset.len()) % dataset.len();
    let item = dataset
        .get(index)
        .cloned()
        .ok_or(SetupError::EmptyDataset)?;
    let truth = normalize(item.sentiment());

    Ok(Round::new(number, index, item, truth, now))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
