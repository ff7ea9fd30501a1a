use strided_nn::{cost, train_loop, Model, TrainConfig, TrainingTable};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // The binary takes no arguments: defaults, clock-derived seed.
    let mut config = TrainConfig::default();
    config.seed = Some(config.effective_seed());
    tracing::info!(seed = ?config.seed, "seeding parameter initialisation");
    let mut rng = config.rng();

    let table = TrainingTable::xor();
    let (ti, to) = (table.inputs(), table.outputs());

    let mut model = Model::xor_random(&mut rng);
    let mut grad = Model::xor();

    println!("cost: {:.6}", cost(&mut model, &ti, &to));
    train_loop(&mut model, &mut grad, &ti, &to, &config);
    println!("cost: {:.6}", cost(&mut model, &ti, &to));

    println!("---------------------------");

    for i in 0..2u8 {
        for j in 0..2u8 {
            let y = model.predict(&[f32::from(i), f32::from(j)]);
            println!("{i} ^ {j} = {y:.6}");
        }
    }
}
