use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::activation::sigmoid::Sigmoid;
use crate::error::{check_len, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Activations of both layers produced by one forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    /// One value per hidden node, after the sigmoid.
    pub hidden: Vec<f64>,
    /// One value per output node, after the sigmoid.
    pub output: Vec<f64>,
}

/// Feedforward network with exactly one hidden layer.
///
/// Widths are fixed at construction. The weights change only through
/// [`train`](Network::train), which takes `&mut self`: any number of
/// concurrent `query` calls may share a `&Network`, but a training step
/// needs exclusive access. Share a network that is trained across threads
/// behind a lock such as `RwLock<Network>`.
///
/// The network is deliberately not `Clone`; it is owned in one place and
/// lent out by reference.
///
/// Nothing guards against NaN/Inf: a learning rate that is too large or
/// unbounded inputs can blow the weights up, and that is left to the caller.
#[derive(Debug)]
pub struct Network {
    learning_rate: f64,
    /// Shape (hidden_size, input_size).
    input_weights: Matrix,
    /// Shape (output_size, hidden_size).
    output_weights: Matrix,
}

impl Network {
    /// Builds a network with weights drawn from `rng`.
    ///
    /// Input→hidden weights come from N(0, 1/√hidden_size) and hidden→output
    /// weights from N(0, 1/√output_size). The input matrix is filled first,
    /// then the output matrix, each row by row, so a seeded `rng` always
    /// yields the same network.
    pub fn new<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;

        let hidden_std = 1.0 / (config.hidden_size as f64).sqrt();
        let output_std = 1.0 / (config.output_size as f64).sqrt();
        let input_weights = Matrix::normal(config.hidden_size, config.input_size, hidden_std, rng)?;
        let output_weights = Matrix::normal(config.output_size, config.hidden_size, output_std, rng)?;

        debug!(
            input_size = config.input_size,
            hidden_size = config.hidden_size,
            output_size = config.output_size,
            learning_rate = config.learning_rate,
            "initialized network"
        );

        Ok(Network {
            learning_rate: config.learning_rate,
            input_weights,
            output_weights,
        })
    }

    /// Same as [`Network::new`] with a `StdRng` seeded from `seed`.
    pub fn from_seed(config: &NetworkConfig, seed: u64) -> Result<Network> {
        Network::new(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network around explicit weight matrices.
    ///
    /// `input_weights` has shape (hidden, input) and `output_weights` shape
    /// (output, hidden); the hidden widths must agree and every width must be
    /// non-zero, exactly as for [`Network::new`].
    pub fn from_weights(input_weights: Matrix, output_weights: Matrix, learning_rate: f64) -> Result<Network> {
        check_len("output weight columns", input_weights.rows(), output_weights.cols())?;
        NetworkConfig::new(input_weights.cols(), input_weights.rows(), output_weights.rows(), learning_rate)
            .validate()?;

        Ok(Network {
            learning_rate,
            input_weights,
            output_weights,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_weights.cols()
    }

    pub fn hidden_size(&self) -> usize {
        self.input_weights.rows()
    }

    pub fn output_size(&self) -> usize {
        self.output_weights.rows()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_weights(&self) -> &Matrix {
        &self.input_weights
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.output_weights
    }

    pub fn config(&self) -> NetworkConfig {
        NetworkConfig::new(self.input_size(), self.hidden_size(), self.output_size(), self.learning_rate)
    }

    /// Forward pass returning both the hidden and output activations.
    pub fn forward(&self, input: &[f64]) -> Result<Activations> {
        check_len("input", self.input_size(), input.len())?;
        Ok(self.feed_forward(input))
    }

    /// Forward pass; every returned value lies in (0, 1).
    pub fn query(&self, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(input)?.output)
    }

    /// One step of online gradient descent on a single labeled example.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.train_with_error(input, target).map(|_| ())
    }

    /// Like [`train`](Network::train), returning the example's MSE as it was
    /// before the update.
    ///
    /// Both lengths are checked before anything is touched, so a shape error
    /// leaves the network unchanged. Targets are used as given; values outside
    /// (0, 1) are not clamped and simply produce larger steps.
    pub fn train_with_error(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        check_len("input", self.input_size(), input.len())?;
        check_len("target", self.output_size(), target.len())?;

        let Activations { hidden, output } = self.feed_forward(input);

        let output_error = MseLoss::error(&output, target);
        // Must read the output weights before they are updated below.
        let hidden_error = self.output_weights.transpose_mul_vec(&output_error);

        let output_delta = layer_delta(&output_error, &output);
        let hidden_delta = layer_delta(&hidden_error, &hidden);

        self.output_weights.add_outer(self.learning_rate, &output_delta, &hidden);
        self.input_weights.add_outer(self.learning_rate, &hidden_delta, input);

        let loss = MseLoss::loss(&output, target);
        trace!(loss, "train step");
        Ok(loss)
    }

    fn feed_forward(&self, input: &[f64]) -> Activations {
        let mut hidden = self.input_weights.mul_vec(input);
        Sigmoid::apply(&mut hidden);

        let mut output = self.output_weights.mul_vec(&hidden);
        Sigmoid::apply(&mut output);

        Activations { hidden, output }
    }
}

/// error ⊙ σ'(activation), with σ' taken on the post-activation values.
fn layer_delta(error: &[f64], activation: &[f64]) -> Vec<f64> {
    error
        .iter()
        .zip(activation)
        .map(|(e, &a)| e * Sigmoid::derivative_from_output(a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    fn fixed_network() -> Network {
        Network::from_weights(
            Matrix::from_data(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap(),
            Matrix::from_data(vec![vec![0.5, 0.6]]).unwrap(),
            0.5,
        )
        .unwrap()
    }

    #[test]
    fn new_has_configured_shapes() {
        let config = NetworkConfig::new(5, 3, 2, 0.1);
        let network = Network::from_seed(&config, 42).unwrap();
        assert_eq!((network.input_weights().rows(), network.input_weights().cols()), (3, 5));
        assert_eq!((network.output_weights().rows(), network.output_weights().cols()), (2, 3));
        assert_eq!(network.config(), config);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = NetworkConfig::new(2, 2, 0, 0.1);
        assert!(matches!(Network::from_seed(&config, 1), Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn same_seed_same_weights() {
        let config = NetworkConfig::new(4, 6, 3, 0.2);
        let a = Network::from_seed(&config, 9).unwrap();
        let b = Network::from_seed(&config, 9).unwrap();
        assert_eq!(a.input_weights(), b.input_weights());
        assert_eq!(a.output_weights(), b.output_weights());
    }

    #[test]
    fn fill_order_is_input_matrix_then_output_matrix() {
        let config = NetworkConfig::new(3, 4, 2, 0.2);
        let network = Network::from_seed(&config, 5).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let input = Matrix::normal(4, 3, 0.5, &mut rng).unwrap();
        let output = Matrix::normal(2, 4, 1.0 / 2f64.sqrt(), &mut rng).unwrap();
        assert_eq!(network.input_weights(), &input);
        assert_eq!(network.output_weights(), &output);
    }

    #[test]
    fn from_weights_rejects_mismatched_hidden_width() {
        let result = Network::from_weights(
            Matrix::zeros(3, 2),
            Matrix::zeros(1, 2),
            0.5,
        );
        assert!(matches!(
            result,
            Err(NetworkError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn from_weights_rejects_zero_widths() {
        for (input, output) in [
            (Matrix::zeros(2, 2), Matrix::zeros(0, 2)),
            (Matrix::zeros(2, 0), Matrix::zeros(1, 2)),
            (Matrix::zeros(0, 2), Matrix::zeros(1, 0)),
        ] {
            assert!(matches!(
                Network::from_weights(input, output, 0.5),
                Err(NetworkError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn from_weights_rejects_bad_learning_rate() {
        let result = Network::from_weights(Matrix::zeros(2, 2), Matrix::zeros(1, 2), 0.0);
        assert!(matches!(result, Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn forward_matches_hand_computation() {
        let network = fixed_network();
        let acts = network.forward(&[1.0, 0.0]).unwrap();
        assert!((acts.hidden[0] - 0.524_979_187_478_94).abs() < 1e-12);
        assert!((acts.hidden[1] - 0.574_442_516_811_659).abs() < 1e-12);
        assert!((acts.output[0] - 0.647_291_569_994_617_8).abs() < 1e-12);
    }

    #[test]
    fn query_rejects_wrong_input_length() {
        let network = fixed_network();
        let err = network.query(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::ShapeMismatch { what: "input", expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn train_shape_error_leaves_weights_untouched() {
        let mut network = fixed_network();
        let before_in = network.input_weights().clone();
        let before_out = network.output_weights().clone();

        assert!(network.train(&[1.0, 0.0], &[1.0, 0.0]).is_err());
        assert!(network.train(&[1.0, 0.0, 0.0], &[1.0]).is_err());

        assert_eq!(network.input_weights(), &before_in);
        assert_eq!(network.output_weights(), &before_out);
    }

    #[test]
    fn train_with_error_reports_pre_update_loss() {
        let mut network = fixed_network();
        let before = network.query(&[1.0, 0.0]).unwrap();
        let loss = network.train_with_error(&[1.0, 0.0], &[1.0]).unwrap();
        assert_eq!(loss, MseLoss::loss(&before, &[1.0]));
    }

    #[test]
    fn layer_delta_uses_post_activation_derivative() {
        assert_eq!(layer_delta(&[2.0, -1.0], &[0.5, 0.0]), vec![0.5, 0.0]);
    }
}
