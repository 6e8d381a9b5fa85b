//! Walk the academic structure of a live backend
//!
//! Expands the first node at every level down to the first semester, prints
//! the outline, then shows the detail view of the deepest expanded node.
//!
//! ```text
//! CAMPUS_API_URL=http://localhost:8000/api RUST_LOG=debug \
//!     cargo run -p structure-tree --example walk_structure
//! ```

use anyhow::Result;
use campus_api::HttpBackend;
use std::sync::Arc;
use structure_tree::prelude::*;

/// Expand down to the semester level
const MAX_DEPTH: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let backend = Arc::new(HttpBackend::from_env()?);
    println!("Using backend at {}", backend.config().base_url);

    let mut navigator = StructureNavigator::new(backend, &NavigatorConfig::from_env());
    navigator.load_roots().await;

    let mut current = navigator.forest().roots().first().map(|row| row.id().clone());
    let mut deepest = None;

    for _ in 0..MAX_DEPTH {
        let Some(id) = current.take() else {
            break;
        };
        if !navigator.toggle(&id) {
            break;
        }
        let forest = navigator.render().await;
        current = forest
            .find(&id)
            .and_then(|row| row.loaded_children().first())
            .map(|child| child.id().clone());
        deepest = Some(id);
    }

    println!("{}", navigator.forest().render_text());

    if let Some(id) = deepest {
        if let Some(view) = navigator.select(&id).await {
            println!("\nSelected {} -> {:?}", view.node, view.kind);
            match view.subjects {
                Some(DetailState::Ready(subjects)) => {
                    for subject in subjects {
                        println!("  - {} ({})", subject.name, subject.subject_type);
                    }
                }
                Some(DetailState::Failed(message)) => println!("  subjects unavailable: {}", message),
                Some(DetailState::Loading) | None => {}
            }
        }
    }

    Ok(())
}
