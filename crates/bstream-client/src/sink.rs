use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use bstream_protos::Block;

use crate::{error::SinkError, range::BlockRange};

/// Destination for decoded blocks. Delivery is at-least-once across
/// reconnects, so downstream readers must tolerate the occasional duplicate.
pub trait BlockSink {
    fn write_block(&mut self, block: &Block) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each block as one JSON line to standard output or a file.
pub struct JsonLinesSink {
    writer: BufWriter<Box<dyn Write>>,
}

impl JsonLinesSink {
    pub fn stdout() -> Self {
        Self {
            writer: BufWriter::new(Box::new(io::stdout())),
        }
    }

    /// Create a sink for the given CLI destination: `-` for standard output,
    /// anything else as a file path in which `{range}` is replaced by the
    /// requested block range.
    pub fn create(destination: &str, range: &BlockRange) -> Result<Self, SinkError> {
        let destination = expand_destination(destination, range);
        if destination == "-" {
            return Ok(Self::stdout());
        }

        let path = Path::new(&destination);
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        Ok(Self {
            writer: BufWriter::new(Box::new(File::create(path)?)),
        })
    }
}

fn expand_destination(destination: &str, range: &BlockRange) -> String {
    destination
        .trim()
        .replacen("{range}", &range.to_string().replace(' ', ""), 1)
}

impl BlockSink for JsonLinesSink {
    fn write_block(&mut self, block: &Block) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, block)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn test_range() -> BlockRange {
        "100-105".parse().unwrap()
    }

    #[test]
    fn expands_range_placeholder() {
        assert_eq!(
            expand_destination("out/blocks-{range}.jsonl", &test_range()),
            "out/blocks-100-105.jsonl"
        );
        assert_eq!(expand_destination(" - ", &test_range()), "-");
        assert_eq!(
            expand_destination("plain.jsonl", &test_range()),
            "plain.jsonl"
        );
    }

    #[test]
    fn writes_one_json_line_per_block() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir
            .path()
            .join("blocks-{range}.jsonl")
            .to_string_lossy()
            .into_owned();

        let mut sink = JsonLinesSink::create(&destination, &test_range()).unwrap();
        for number in 100..102 {
            let block = Block {
                id: format!("{number:08x}"),
                number,
                previous_id: format!("{:08x}", number - 1),
                timestamp: 1600000000,
                transaction_count: 1,
                payload: vec![1, 2, 3],
            };
            sink.write_block(&block).unwrap();
        }
        sink.finish().unwrap();

        let written = fs::read_to_string(dir.path().join("blocks-100-105.jsonl")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["number"], 100);
        assert_eq!(first["id"], "00000064");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir
            .path()
            .join("nested/deeper/blocks.jsonl")
            .to_string_lossy()
            .into_owned();

        let mut sink = JsonLinesSink::create(&destination, &test_range()).unwrap();
        sink.finish().unwrap();

        assert!(dir.path().join("nested/deeper/blocks.jsonl").exists());
    }
}
