use tracing::debug;

use crate::{
    error::{check_len, NetworkError, Result},
    loss::mse::MseLoss,
    network::network::Network,
};

/// Runs one online pass over the dataset, one `train` step per example, in
/// the order given. Returns the mean pre-update MSE over the pass.
///
/// Shuffling, the number of passes and when to stop are up to the caller.
/// A shape error on any example aborts the pass; earlier examples have
/// already been applied at that point.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total_loss = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        total_loss += network.train_with_error(input, target)?;
    }

    let mean = total_loss / inputs.len() as f64;
    debug!(samples = inputs.len(), loss = mean, "epoch finished");
    Ok(mean)
}

/// Mean MSE over a dataset using `query` only; the network is not modified.
pub fn evaluate(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.query(input)?;
        check_len("target", output.len(), target.len())?;
        total += MseLoss::loss(&output, target);
    }
    Ok(total / inputs.len() as f64)
}

/// Fraction of examples whose strongest output matches the strongest target.
pub fn accuracy(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    check_dataset(inputs, targets)?;

    let mut correct = 0usize;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.query(input)?;
        check_len("target", output.len(), target.len())?;
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / inputs.len() as f64)
}

/// Index of the maximum element in a slice (first one on ties, 0 if empty).
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn check_dataset(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }
    if inputs.len() != targets.len() {
        return Err(NetworkError::DatasetLength {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}
