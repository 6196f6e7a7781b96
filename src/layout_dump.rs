use crate::layout::TimelineLayout;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub scale: String,
    pub unit_width: f32,
    pub total_width: f32,
    pub min_calendar_date: String,
    pub max_calendar_date: String,
    pub timeline_years: Vec<i32>,
    pub total_days: i64,
    pub total_hours: i64,
    pub center_of_gravity: String,
    pub tick_counts: [usize; 3],
    pub rows: Vec<RowDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub id: String,
    pub lane_count: usize,
    pub skipped: Vec<String>,
    pub elements: Vec<ElementDump>,
}

#[derive(Debug, Serialize)]
pub struct ElementDump {
    pub id: String,
    pub lane: usize,
    pub start: String,
    pub end: String,
    pub offset_percentage: f64,
    pub percentage: f64,
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout) -> Self {
        let rows = layout
            .rows
            .iter()
            .map(|row| {
                let mut elements = Vec::new();
                for (lane_index, lane) in row.lanes.iter().enumerate() {
                    for element in &lane.elements {
                        elements.push(ElementDump {
                            id: element.id.clone(),
                            lane: lane_index,
                            start: format_datetime(element.start),
                            end: format_datetime(element.end),
                            offset_percentage: element.offset_percentage,
                            percentage: element.percentage,
                        });
                    }
                }
                RowDump {
                    id: row.id.clone(),
                    lane_count: row.lanes.len(),
                    skipped: row.skipped.clone(),
                    elements,
                }
            })
            .collect();

        LayoutDump {
            scale: layout.scale.scale.token().to_string(),
            unit_width: layout.scale.unit_width,
            total_width: layout.scale.total_width,
            min_calendar_date: format_datetime(layout.bounds.min_calendar_date),
            max_calendar_date: format_datetime(layout.bounds.max_calendar_date),
            timeline_years: layout.bounds.timeline_years.clone(),
            total_days: layout.bounds.total_days,
            total_hours: layout.bounds.total_hours,
            center_of_gravity: format_datetime(layout.bounds.center_of_gravity),
            tick_counts: [
                layout.scale.tick_rows[0].len(),
                layout.scale.tick_rows[1].len(),
                layout.scale.tick_rows[2].len(),
            ],
            rows,
        }
    }
}

pub fn dump_layout_json(layout: &TimelineLayout) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &TimelineLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
