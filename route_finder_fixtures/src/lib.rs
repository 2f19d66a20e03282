//! Map fixtures in a Moving AI-like text format, with scenarios listing the expected hop count and
//! cost of a cheapest route.
//!
//! Maps live in `maps/<set>/<name>.map` and use `.` for open cells, `@`, `#` or `T` for walls and
//! a digit from 2 to 9 for a cell with that weight. Scenarios live in
//! `scenarios/<set>/<name>.map.scen`. Scenario endpoints are always plain open cells.
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tile {
    Open,
    Wall,
    Weighted(f64),
}

impl Tile {
    fn from_byte(byte: u8) -> Tile {
        match byte {
            b'@' | b'#' | b'T' => Tile::Wall,
            b'2'..=b'9' => Tile::Weighted((byte - b'0') as f64),
            _ => Tile::Open,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MapFixture {
    pub rows: usize,
    pub cols: usize,
    tiles: Vec<Tile>,
}

impl MapFixture {
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.cols + col]
    }

    /// Every tile with its `(row, col)`, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = ((i32, i32), Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(ix, tile)| {
            let position = ((ix / self.cols) as i32, (ix % self.cols) as i32);
            (position, *tile)
        })
    }
}

/// One route query. Negative `hops` and `cost` mark an end that cannot be reached.
#[allow(unused)]
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub id: u32,
    file_name: String,
    rows: usize,
    cols: usize,
    start_row: i32,
    start_col: i32,
    end_row: i32,
    end_col: i32,
    /// Moves on a route with the fewest cells.
    pub hops: i64,
    /// Summed weight of a cheapest route, start included.
    pub cost: f64,
}

impl Scenario {
    pub fn start(&self) -> (i32, i32) {
        (self.start_row, self.start_col)
    }

    pub fn end(&self) -> (i32, i32) {
        (self.end_row, self.end_col)
    }

    pub fn is_reachable(&self) -> bool {
        self.hops >= 0
    }
}

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

fn load_fixture(name: &str) -> (MapFixture, Vec<Scenario>) {
    let root = fixture_root();
    let map_str = fs::read_to_string(root.join(format!("maps/{name}.map")))
        .expect("Could not read map file");
    let file = File::open(root.join(format!("scenarios/{name}.map.scen")))
        .expect("Could not open scenario file");

    // Skip the version line
    let reader = io::BufReader::new(file);
    let mut lines = reader.lines();
    lines.next();
    let remaining_data = lines
        .collect::<Result<Vec<_>, _>>()
        .expect("Could not read scenario file")
        .join("\n");

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(remaining_data.as_bytes());
    let scenarios = csv_reader
        .deserialize()
        .map(|record| record.expect("Could not parse scenario record"))
        .collect::<Vec<Scenario>>();

    let lines: Vec<&str> = map_str.lines().collect();
    let parse_line = |line: &str| -> usize {
        line.split_once(' ')
            .expect("Malformed map header")
            .1
            .parse::<usize>()
            .expect("Could not parse value")
    };
    let rows = parse_line(lines[1]);
    let cols = parse_line(lines[2]);

    let offset = 4;
    let mut tiles = Vec::with_capacity(rows * cols);
    for line in &lines[offset..offset + rows] {
        let bytes = line.as_bytes();
        assert_eq!(bytes.len(), cols, "Map row has the wrong width");
        tiles.extend(bytes.iter().map(|&b| Tile::from_byte(b)));
    }
    for scenario in &scenarios {
        assert_eq!((scenario.rows, scenario.cols), (rows, cols));
    }
    (MapFixture { rows, cols, tiles }, scenarios)
}

/// Names such as `basic/corridor` of every map below `maps/`.
pub fn get_fixture_names() -> Vec<String> {
    let root = fixture_root()
        .join("maps")
        .canonicalize()
        .expect("Failed to canonicalize root path");
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.expect("Could not get dir entry");
        let rel_path = entry
            .path()
            .strip_prefix(&root)
            .expect("Entry outside of the map root");
        if rel_path.components().count() >= 2 {
            let name = rel_path
                .to_str()
                .and_then(|path| path.split_once('.'))
                .expect("Map file without extension")
                .0;
            names.push(name.replace('\\', "/"));
        }
    }
    names
}

pub fn get_fixture(name: &str) -> (MapFixture, Vec<Scenario>) {
    if get_fixture_names().iter().any(|known| known == name) {
        load_fixture(name)
    } else {
        panic!("Could not load fixture {name}!");
    }
}
