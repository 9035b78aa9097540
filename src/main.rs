use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskflow_editor::{
  DeleteOutcome, EditorConfig, EditorSession, Key, SelectionChange, Viewport,
};
use taskflow_graph::{FieldKey, Position};

/// Taskflow - compose task pipelines and exchange them as flow documents
#[derive(Parser)]
#[command(name = "taskflow")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.taskflow)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Path to the editor config file (default: <data-dir>/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Write an empty flow document
  New {
    /// Directory to write flow.json into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Overwrite an existing flow document
    #[arg(long)]
    force: bool,
  },

  /// Add a task node
  Add {
    /// Flow document to edit
    #[arg(short, long)]
    file: PathBuf,

    /// Exact x position (default: near the viewport center)
    #[arg(long, requires = "y", value_parser = parse_coordinate)]
    x: Option<f64>,

    /// Exact y position
    #[arg(long, requires = "x", value_parser = parse_coordinate)]
    y: Option<f64>,

    #[arg(long)]
    task_name: Option<String>,

    /// Resource specification, e.g. "100&10"
    #[arg(long)]
    resource: Option<String>,

    #[arg(long)]
    params: Option<String>,
  },

  /// Set one field of a node
  Set {
    #[arg(short, long)]
    file: PathBuf,

    node: String,

    /// taskId, taskName, memThread (or resourceSpec) or params
    key: String,

    value: String,
  },

  /// Add a dependency edge
  Connect {
    #[arg(short, long)]
    file: PathBuf,

    source: String,

    target: String,
  },

  /// Delete nodes and edges
  Delete {
    #[arg(short, long)]
    file: PathBuf,

    /// Node to delete (repeatable)
    #[arg(long = "node")]
    nodes: Vec<String>,

    /// Edge to delete (repeatable)
    #[arg(long = "edge")]
    edges: Vec<String>,
  },

  /// Print the nodes, edges and topology of a flow document
  Show {
    #[arg(short, long)]
    file: PathBuf,
  },

  /// Report dangling edges, self-loops, duplicate edges and cycles
  Check {
    #[arg(short, long)]
    file: PathBuf,
  },
}

fn main() -> Result<()> {
  init_tracing();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".taskflow"),
  };

  let Some(command) = cli.command else {
    println!("taskflow - use --help to see available commands");
    return Ok(());
  };

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(run(command, cli.config, data_dir))
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

async fn load_config(explicit: Option<&Path>, data_dir: &Path) -> Result<EditorConfig> {
  let config = match explicit {
    Some(path) => EditorConfig::load(path).await?,
    None => EditorConfig::load_or_default(&data_dir.join("config.json")).await?,
  };
  Ok(config)
}

async fn run(command: Commands, config_path: Option<PathBuf>, data_dir: PathBuf) -> Result<()> {
  let config = load_config(config_path.as_deref(), &data_dir).await?;

  match command {
    Commands::New { out_dir, force } => {
      let path = new_document(config, &out_dir, force).await?;
      println!("{}", path.display());
    }

    Commands::Add {
      file,
      x,
      y,
      task_name,
      resource,
      params,
    } => {
      let mut session = open(&file, config).await?;

      let node_id = match (x, y) {
        (Some(x), Some(y)) => session.add_node_at(Position::new(x, y)).id.clone(),
        _ => session.add_node(&Viewport::default()).id.clone(),
      };

      let overrides = [
        (FieldKey::TaskName, task_name),
        (FieldKey::ResourceSpec, resource),
        (FieldKey::Params, params),
      ];
      for (key, value) in overrides {
        if let Some(value) = value {
          session.update_field(&node_id, key.as_str(), &value)?;
        }
      }

      save(&session, &file).await?;
      println!("{}", node_id);
    }

    Commands::Set {
      file,
      node,
      key,
      value,
    } => {
      let mut session = open(&file, config).await?;
      if !session.update_field(&node, &key, &value)? {
        bail!("node '{}' not found in {}", node, file.display());
      }
      save(&session, &file).await?;
    }

    Commands::Connect {
      file,
      source,
      target,
    } => {
      let mut session = open(&file, config).await?;
      for endpoint in [&source, &target] {
        if session.store().node(endpoint).is_none() {
          bail!("node '{}' not found in {}", endpoint, file.display());
        }
      }

      let edge_id = session.connect(&source, &target).id.clone();
      save(&session, &file).await?;
      println!("{}", edge_id);
    }

    Commands::Delete { file, nodes, edges } => {
      let mut session = open(&file, config).await?;
      session.on_selection_change(SelectionChange::new(nodes, edges));

      if let DeleteOutcome::Deleted { node_ids, edge_ids } = session.on_key(&Key::Delete) {
        for id in node_ids.iter().chain(edge_ids.iter()) {
          println!("{}", id);
        }
      }
      save(&session, &file).await?;
    }

    Commands::Show { file } => {
      let session = open(&file, config).await?;
      show(&session);
    }

    Commands::Check { file } => {
      let session = open(&file, config).await?;
      let problems = check(&session);
      if problems > 0 {
        bail!("{} problem(s) found in {}", problems, file.display());
      }
      println!("ok");
    }
  }

  Ok(())
}

fn parse_coordinate(value: &str) -> Result<f64, String> {
  let coordinate = value.parse::<f64>().map_err(|e| e.to_string())?;
  if !coordinate.is_finite() {
    return Err(format!("'{value}' is not a finite number"));
  }
  Ok(coordinate)
}

async fn new_document(config: EditorConfig, out_dir: &Path, force: bool) -> Result<PathBuf> {
  let session = EditorSession::new(config);
  let path = out_dir.join(&session.config().export_file_name);
  if !force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
    bail!("{} already exists (use --force to overwrite)", path.display());
  }

  session
    .export_to_file(&path)
    .await
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(path)
}

async fn open(file: &Path, config: EditorConfig) -> Result<EditorSession> {
  let mut session = EditorSession::new(config);
  session
    .import_file(file)
    .await
    .with_context(|| format!("failed to load flow document: {}", file.display()))?;
  Ok(session)
}

async fn save(session: &EditorSession, file: &Path) -> Result<()> {
  session
    .export_to_file(file)
    .await
    .with_context(|| format!("failed to write flow document: {}", file.display()))?;
  info!(path = %file.display(), "saved");
  Ok(())
}

fn show(session: &EditorSession) {
  let store = session.store();
  let topology = store.topology();

  println!("nodes:");
  for node in store.nodes() {
    println!(
      "  {} ({:.1}, {:.1}) taskId={} taskName={} memThread={} params={}",
      node.id,
      node.position.x,
      node.position.y,
      node.fields.task_id,
      node.fields.task_name,
      node.fields.resource_spec,
      node.fields.params,
    );
  }

  println!("edges:");
  for edge in store.edges() {
    println!("  {}: {} -> {}", edge.id, edge.source, edge.target);
  }

  println!("entry points: {}", topology.entry_points().join(", "));
  match topology.topological_order() {
    Some(order) => println!("order: {}", order.join(" -> ")),
    None => println!("order: (graph has a cycle)"),
  }
}

fn check(session: &EditorSession) -> usize {
  let store = session.store();
  let mut problems = 0;

  for edge in store.dangling_edges() {
    println!("dangling edge {}: {} -> {}", edge.id, edge.source, edge.target);
    problems += 1;
  }

  let mut seen = HashSet::new();
  for edge in store.edges() {
    if edge.is_self_loop() {
      println!("self-loop {} on {}", edge.id, edge.source);
      problems += 1;
    }
    if !seen.insert((edge.source.as_str(), edge.target.as_str())) {
      println!("duplicate edge {}: {} -> {}", edge.id, edge.source, edge.target);
      problems += 1;
    }
  }

  if store.topology().has_cycle() {
    println!("graph has a cycle");
    problems += 1;
  }

  problems
}
