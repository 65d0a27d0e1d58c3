//! dockyard - lay out and check saved perspectives from the command line

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use dockyard::cli::{Action, CliArgs, OutputFormat};
use dockyard::config::DockConfig;
use dockyard::geometry::Rect;
use dockyard::manager::DockManager;
use dockyard::panel::{DockDirection, PaneInfo, Placement, WindowId};
use dockyard::perspective::{self, LoadReport};

#[derive(Debug, Serialize)]
struct PaneReport {
    name: String,
    placement: Placement,
    direction: DockDirection,
    layer: i32,
    row: i32,
    position: i32,
    rect: Option<Rect>,
    content: Option<Rect>,
}

#[derive(Debug, Serialize)]
struct DockReport {
    direction: DockDirection,
    layer: i32,
    row: i32,
    size: i32,
    rect: Rect,
    panes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    container: Rect,
    center: Rect,
    panes: Vec<PaneReport>,
    docks: Vec<DockReport>,
}

fn main() -> Result<()> {
    dockyard::tracing::init();

    let action = CliArgs::parse().into_action().map_err(|e| anyhow!(e))?;
    match action {
        Action::Layout {
            path,
            container,
            format,
        } => {
            let (manager, _) = load_manager(&path, container)?;
            let report = layout_report(&manager);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_layout(&report),
            }
        }
        Action::Check { path } => {
            let (_, report) = load_manager(&path, Rect::EMPTY)?;
            println!(
                "{}: {} panes, {} dock sizes, {} skipped",
                path.display(),
                report.applied,
                report.dock_sizes.len(),
                report.skipped
            );
            if report.skipped > 0 {
                bail!("{} malformed records in {}", report.skipped, path.display());
            }
        }
    }

    Ok(())
}

/// Build a manager holding one pane per record of the perspective at `path`
fn load_manager(path: &Path, container: Rect) -> Result<(DockManager, LoadReport)> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read perspective {}", path.display()))?;

    let mut manager = DockManager::new(DockConfig::load());
    manager.set_container(container);
    for (index, name) in perspective::pane_names(&input)?.into_iter().enumerate() {
        manager.add_pane(WindowId(index as u64 + 1), PaneInfo::new().name(name))?;
    }

    let report = manager.load_perspective(&input, true)?;
    Ok((manager, report))
}

fn layout_report(manager: &DockManager) -> LayoutReport {
    let layout = manager.layout();

    let panes = manager
        .panes()
        .iter()
        .map(|(id, pane)| PaneReport {
            name: pane.name.clone(),
            placement: pane.placement(),
            direction: pane.direction,
            layer: pane.layer,
            row: pane.row,
            position: pane.position,
            rect: layout.pane_rect(id),
            content: layout.content_rect(id),
        })
        .collect();

    let docks = manager
        .docks()
        .iter()
        .map(|dock| DockReport {
            direction: dock.direction(),
            layer: dock.layer(),
            row: dock.row(),
            size: dock.size,
            rect: dock.rect,
            panes: dock
                .panes
                .iter()
                .filter_map(|id| manager.pane_by_id(*id))
                .map(|pane| pane.name.clone())
                .collect(),
        })
        .collect();

    LayoutReport {
        container: layout.container,
        center: layout.center,
        panes,
        docks,
    }
}

fn show(rect: &Rect) -> String {
    format!("{},{} {}x{}", rect.x, rect.y, rect.width, rect.height)
}

fn print_layout(report: &LayoutReport) {
    println!("container {}", show(&report.container));
    println!("center    {}", show(&report.center));

    for dock in &report.docks {
        println!(
            "dock {:?}/{}/{} size {} at {}: {}",
            dock.direction,
            dock.layer,
            dock.row,
            dock.size,
            show(&dock.rect),
            dock.panes.join(", ")
        );
    }

    for pane in &report.panes {
        let rect = pane
            .rect
            .as_ref()
            .map_or_else(|| "-".to_string(), show);
        println!("pane {:<20} {:?} {}", pane.name, pane.placement, rect);
    }
}
