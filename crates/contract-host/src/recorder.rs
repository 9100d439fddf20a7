//! ActionResult recorder.
//!
//! Every frame owns an [`ActionRecorder`] collecting the results of the operations it triggers.
//! When the frame returns, [`ActionRecorder::finish`] wraps them under the frame's own result,
//! and the bounds of [`constants::record`](crate::constants::record) are applied to the tree.

use alloy_primitives::Bytes;

use crate::{
    constants::record::{MAX_RECORDED_ARGS_LEN, MAX_RECORD_DEPTH},
    Action, ActionResult, DispatchError,
};

/// Collects the sub-results of one frame, in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRecorder {
    sub_results: Vec<ActionResult>,
}

impl ActionRecorder {
    /// Creates an empty recorder.
    pub const fn new() -> Self {
        Self { sub_results: Vec::new() }
    }

    /// Appends the result of an operation triggered by the frame.
    pub fn record(&mut self, result: ActionResult) {
        self.sub_results.push(result);
    }

    /// The sub-results recorded so far.
    pub fn sub_results(&self) -> &[ActionResult] {
        &self.sub_results
    }

    /// Builds the bounded result of the frame.
    ///
    /// An out-of-gas failure reports the whole `gas_limit` as used. A failure never carries
    /// output data.
    pub fn finish(
        self,
        input_action: Action,
        gas_limit: u64,
        gas_used: u64,
        result: &Result<Option<Bytes>, DispatchError>,
    ) -> ActionResult {
        let gas_used = match result {
            Err(DispatchError::OutOfGas) => gas_limit,
            _ => gas_used,
        };
        let (success, error, output_data) = match result {
            Ok(output) => {
                (true, String::new(), output.as_ref().map(|o| o.to_vec()).unwrap_or_default())
            }
            Err(err) => (false, err.to_string(), Vec::new()),
        };

        let mut action_result = ActionResult {
            input_action: Some(input_action),
            success,
            error,
            gas_used,
            remaining_gas: gas_limit.saturating_sub(gas_used),
            output_data,
            sub_action_results: self.sub_results,
        };
        bound_action_result(&mut action_result);
        action_result
    }
}

/// Applies the record bounds to a result tree rooted at depth 1.
///
/// Recorded arguments are clipped to [`MAX_RECORDED_ARGS_LEN`] bytes and sub-results below
/// [`MAX_RECORD_DEPTH`] are dropped.
pub fn bound_action_result(result: &mut ActionResult) {
    bound_at(result, 1);
}

fn bound_at(result: &mut ActionResult, depth: usize) {
    if let Some(action) = result.input_action.as_mut() {
        action.args.truncate(MAX_RECORDED_ARGS_LEN);
    }
    if depth >= MAX_RECORD_DEPTH {
        result.sub_action_results.clear();
        return;
    }
    for sub in &mut result.sub_action_results {
        bound_at(sub, depth + 1);
    }
}
