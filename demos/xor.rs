use shallow_nn::{train_epoch, Network, NetworkConfig};

fn main() -> shallow_nn::Result<()> {
    // No bias terms, so the hidden layer needs some width to carve out XOR.
    let config = NetworkConfig::new(2, 8, 1, 0.5);
    let mut network = Network::from_seed(&config, 42)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![0.99],
        vec![0.01],
        vec![0.99],
        vec![0.01],
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_epoch(&mut network, &inputs, &expected_outputs)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.query(input)?[0]);
    }

    Ok(())
}
