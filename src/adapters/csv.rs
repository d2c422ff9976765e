//! Tables as CSV.

use anyhow::Result;
use ausflug_core::usecases::{HikeRow, PlaceRow};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct PlaceRecord<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Beschreibung")]
    description: &'a str,
    #[serde(rename = "Latitude")]
    lat: Option<f64>,
    #[serde(rename = "Longitude")]
    lon: Option<f64>,
    #[serde(rename = "Google Maps")]
    link: &'a str,
}

impl<'a> From<&'a PlaceRow> for PlaceRecord<'a> {
    fn from(row: &'a PlaceRow) -> Self {
        Self {
            name: &row.name,
            description: &row.description,
            lat: row.lat,
            lon: row.lon,
            link: &row.link,
        }
    }
}

#[derive(Serialize)]
struct HikeRecord<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Dauer")]
    duration: &'a str,
    #[serde(rename = "Link")]
    link: &'a str,
}

impl<'a> From<&'a HikeRow> for HikeRecord<'a> {
    fn from(row: &'a HikeRow) -> Self {
        Self {
            name: &row.name,
            duration: &row.duration,
            link: &row.link,
        }
    }
}

pub fn write_places<W: io::Write>(writer: W, rows: &[PlaceRow]) -> Result<()> {
    write_records(writer, rows.iter().map(PlaceRecord::from))
}

pub fn write_hikes<W: io::Write>(writer: W, rows: &[HikeRow]) -> Result<()> {
    write_records(writer, rows.iter().map(HikeRecord::from))
}

fn write_records<W, R, I>(writer: W, records: I) -> Result<()>
where
    W: io::Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut wtr = ::csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
