//! Reader for the MNIST-in-CSV layout: one optional header row, then one row
//! per image of the form `label,p0,p1,…,p783` with pixels in 0–255.

use std::io::BufRead;

use log::info;

use crate::data::mnist::{MnistImage, CLASS_COUNT, PIXEL_COUNT};
use crate::error::{Error, Result};

pub fn load_mnist_csv<R: BufRead>(reader: R) -> Result<Vec<MnistImage>> {
    let mut images = Vec::new();

    for (row_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Auto-detect header: skip the first line if any cell is non-numeric.
        if row_idx == 0 && is_header(line) {
            continue;
        }
        images.push(parse_row(line, row_idx + 1)?);
    }

    info!("loaded {} images", images.len());
    Ok(images)
}

/// Opens and reads a CSV file from disk.
pub fn load_mnist_csv_file<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<MnistImage>> {
    let file = std::fs::File::open(path)?;
    load_mnist_csv(std::io::BufReader::new(file))
}

fn is_header(line: &str) -> bool {
    line.split(',').any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

fn parse_row(line: &str, row: usize) -> Result<MnistImage> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.len() != PIXEL_COUNT + 1 {
        return Err(Error::Csv {
            row,
            message: format!("expected {} columns, got {}", PIXEL_COUNT + 1, cells.len()),
        });
    }

    let label = cells[0].parse::<u8>().ok()
        .filter(|&l| (l as usize) < CLASS_COUNT)
        .ok_or_else(|| Error::Csv {
            row,
            message: format!("label '{}' is not a digit 0-9", cells[0]),
        })?;

    let brightness = cells[1..].iter()
        .map(|c| {
            c.parse::<u8>().map_err(|_| Error::Csv {
                row,
                message: format!("pixel '{c}' is not in 0-255"),
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    Ok(MnistImage::from_grayscale(label, &brightness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn row(label: &str, fill: &str) -> String {
        std::iter::once(label.to_string())
            .chain(std::iter::repeat(fill.to_string()).take(PIXEL_COUNT))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn skips_header_and_replicates_grey() {
        let text = format!("label,1x1,1x2\n{}\n{}\n", row("7", "128"), row("0", "0"));
        let images = load_mnist_csv(Cursor::new(text)).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].label, 7);
        assert_eq!(&images[0].pixels[..4], &[128, 128, 128, 255]);
        assert_eq!(images[1].label, 0);
    }

    #[test]
    fn reports_row_of_bad_pixel() {
        let text = format!("{}\n{}\n", row("1", "3"), row("2", "300"));
        match load_mnist_csv(Cursor::new(text)) {
            Err(Error::Csv { row, .. }) => assert_eq!(row, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_label_and_short_rows() {
        assert!(matches!(
            load_mnist_csv(Cursor::new(row("12", "0"))),
            Err(Error::Csv { row: 1, .. })
        ));
        assert!(matches!(
            load_mnist_csv(Cursor::new("3,0,0,0\n")),
            Err(Error::Csv { row: 1, .. })
        ));
    }
}
