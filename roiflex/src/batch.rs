//! Splitting an ROI set into per-group instrument files.
//!
//! Group `i` (0-based) is written next to its siblings as
//! `<base_name>_<i>.xml`, plus `<base_name>_<i>.csv` for box sets.

use std::path::PathBuf;

use log::info;

use crate::config::BatchConfig;
use crate::contour::BoxRecord;
use crate::error::{Error, Result};
use crate::fleximaging::serialize;
use crate::geometry::{Area, Point};
use crate::partition::{partition, partition_boxes};
use crate::report::write_boxes_csv;

/// Files written for each group, in group order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    pub group_sizes: Vec<usize>,
    /// Empty for polygon sets.
    pub csv_paths: Vec<PathBuf>,
    pub xml_paths: Vec<PathBuf>,
}

/// Partitions `boxes`, then writes each group's box CSV and document.
pub fn split_boxes(boxes: Vec<BoxRecord>, config: &BatchConfig) -> Result<BatchOutput> {
    let groups = partition_boxes(boxes, &config.partition_config())?;
    prepare_output_dir(config)?;

    let mut output = BatchOutput::default();
    for (i, group) in groups.iter().enumerate() {
        let csv_path = config.group_path(i, "csv");
        write_boxes_csv(group, &csv_path)?;

        let areas: Vec<Area> = group.iter().map(BoxRecord::to_area).collect();
        let xml_path = config.group_path(i, "xml");
        serialize(&areas, &config.export_settings(i))?.write_to(&xml_path)?;

        output.group_sizes.push(group.len());
        output.csv_paths.push(csv_path);
        output.xml_paths.push(xml_path);
    }

    info!(
        "Split {} boxes into {} groups ({:?})",
        output.group_sizes.iter().sum::<usize>(),
        output.group_sizes.len(),
        output.group_sizes
    );
    Ok(output)
}

/// Partitions `polygons` (raster-order vertices), then writes each group's
/// document.
pub fn split_polygons(polygons: Vec<Vec<Point>>, config: &BatchConfig) -> Result<BatchOutput> {
    let groups = partition(polygons, &config.partition_config())?;
    prepare_output_dir(config)?;

    let mut output = BatchOutput::default();
    for (i, group) in groups.into_iter().enumerate() {
        output.group_sizes.push(group.len());

        let areas: Vec<Area> = group.into_iter().map(Area::Polygon).collect();
        let xml_path = config.group_path(i, "xml");
        serialize(&areas, &config.export_settings(i))?.write_to(&xml_path)?;
        output.xml_paths.push(xml_path);
    }

    info!(
        "Split {} polygons into {} groups ({:?})",
        output.group_sizes.iter().sum::<usize>(),
        output.group_sizes.len(),
        output.group_sizes
    );
    Ok(output)
}

fn prepare_output_dir(config: &BatchConfig) -> Result<()> {
    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}
