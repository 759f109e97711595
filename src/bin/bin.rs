use anyhow::Context;
use floodview::{
    AnimationDriver, CsvDirSource, FrameSequence, MsgpackSceneSink, ReplayConfig, RoleClassifier,
    SceneComposer, TrajectoryStore,
};
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};
use std::{env, fs::File, io::BufWriter};

fn main() -> anyhow::Result<()> {
    SimpleLogger::init(LevelFilter::Info, LogConfig::default())?;
    let config_path = env::args()
        .nth(1)
        .context("usage: floodview <scenario.yaml>")?;
    let config = ReplayConfig::from_yaml_file(&config_path)?;

    let source = CsvDirSource::with_prefix(config.data_dir.clone(), config.file_prefix.clone());
    let store = TrajectoryStore::load(&source, config.num_devices)?;
    let classifier = RoleClassifier::new(config.roles.clone(), store.num_devices())?;
    let composer = SceneComposer::new(config.composer_options(), &classifier.roles());
    let frames = FrameSequence::new(&store);

    let out = File::create(&config.output)
        .with_context(|| format!("creating {}", config.output.display()))?;
    let mut sink = MsgpackSceneSink::new(BufWriter::new(out));

    let driver = AnimationDriver::new(config.interval());
    driver.play(&frames, &classifier, &composer, &mut sink)?;
    info!("wrote {}", config.output.display());
    Ok(())
}
