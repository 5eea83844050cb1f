//! ラティスの内容を表示するユーティリティ
//!
//! このバイナリは、タブ区切りの辞書ファイルを読み込み、標準入力から読み込んだ
//! 読み文字列ごとにラティスを構築して、各位置の開始・終了索引を出力します。
//!
//! 辞書ファイルの各行は `読み<TAB>表層形<TAB>左ID<TAB>右ID<TAB>コスト` です。
//! `#`で始まる行と空行は無視します。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use henkan_lattice::{Lattice, LatticeConfig, Node, PositionUnit};

use clap::Parser;
use hashbrown::HashMap;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Begin,
    End,
    Both,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "begin" => Ok(Self::Begin),
            "end" => Ok(Self::End),
            "both" => Ok(Self::Both),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// 位置の単位（コマンドライン用）
#[derive(Clone, Debug)]
struct UnitArg(PositionUnit);

impl FromStr for UnitArg {
    type Err = &'static str;

    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        match unit {
            "char" => Ok(Self(PositionUnit::Char)),
            "byte" => Ok(Self(PositionUnit::Byte)),
            _ => Err("Could not parse a position unit"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "dump", about = "Prints the candidate lattice of each input key")]
struct Args {
    /// Lexicon in TSV (reading, surface, left id, right id, cost).
    #[clap(short = 'l', long)]
    lexicon: PathBuf,

    /// Output mode. Choices are begin, end, and both.
    #[clap(short = 'O', long, default_value = "both")]
    output_mode: OutputMode,

    /// Position unit. Choices are char and byte.
    #[clap(short = 'u', long, default_value = "char")]
    unit: UnitArg,

    /// Maximum reading length to look up.
    #[clap(short = 'M', long, default_value = "16")]
    max_len: usize,
}

/// 辞書の1エントリ
#[derive(Clone, Debug)]
struct Entry {
    value: String,
    left_id: u16,
    right_id: u16,
    cost: i32,
}

/// 辞書ファイルを読み込み、読みをキーとするマップを作成します。
fn load_lexicon(path: &Path) -> Result<HashMap<String, Vec<Entry>>, Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lexicon: HashMap<String, Vec<Entry>> = HashMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 5 {
            return Err(format!("line {}: expected 5 columns, got {}", i + 1, cols.len()).into());
        }
        lexicon.entry(cols[0].to_string()).or_default().push(Entry {
            value: cols[1].to_string(),
            left_id: cols[2].parse()?,
            right_id: cols[3].parse()?,
            cost: cols[4].parse()?,
        });
    }
    Ok(lexicon)
}

/// 全部分文字列を辞書引きし、見つかった候補をラティスに挿入します。
fn build(
    lattice: &mut Lattice,
    lexicon: &HashMap<String, Vec<Entry>>,
    max_len: usize,
) -> Result<(), Box<dyn Error>> {
    let len = lattice.len();
    for start in 0..len {
        for end in start + 1..=(start + max_len).min(len) {
            let Some(reading) = lattice.key_slice(start, end) else {
                continue;
            };
            let Some(entries) = lexicon.get(reading) else {
                continue;
            };
            let reading = reading.to_string();
            for entry in entries {
                let node = lattice.new_node();
                let n = lattice.node_mut(node);
                n.key.clone_from(&reading);
                n.value.clone_from(&entry.value);
                n.left_id = entry.left_id;
                n.right_id = entry.right_id;
                n.word_cost = entry.cost;
                lattice.insert(start, node)?;
            }
        }
    }
    Ok(())
}

fn write_node<W: Write>(out: &mut W, node: &Node) -> std::io::Result<()> {
    if node.is_bos() {
        return write!(out, "\tBOS");
    }
    if node.is_eos() {
        return write!(out, "\tEOS");
    }
    write!(
        out,
        "\t{}/{}({},{},{})",
        node.key, node.value, node.left_id, node.right_id, node.word_cost
    )
}

/// メイン関数
///
/// 辞書をロードし、標準入力の各行をキーとしてラティスを構築し、
/// 指定された形式で索引の内容を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the lexicon...");
    let lexicon = load_lexicon(&args.lexicon)?;
    eprintln!("Loaded {} readings", lexicon.len());

    let config = LatticeConfig::default().position_unit(args.unit.0);
    let mut lattice = Lattice::with_config(config);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        lattice.set_key(&line);
        build(&mut lattice, &lexicon, args.max_len)?;

        writeln!(
            &mut out,
            "KEY\t{}\tlen={}\tnodes={}",
            lattice.key(),
            lattice.len(),
            lattice.num_nodes()
        )?;
        for pos in 0..=lattice.len() {
            if matches!(args.output_mode, OutputMode::Begin | OutputMode::Both) {
                write!(&mut out, "{pos}\tbegin")?;
                for (_, node) in lattice.begin_chain(pos) {
                    write_node(&mut out, node)?;
                }
                out.write_all(b"\n")?;
            }
            if matches!(args.output_mode, OutputMode::End | OutputMode::Both) {
                write!(&mut out, "{pos}\tend")?;
                for (_, node) in lattice.end_chain(pos) {
                    write_node(&mut out, node)?;
                }
                out.write_all(b"\n")?;
            }
        }
        out.write_all(b"EOS\n")?;
    }
    lattice.clear();

    Ok(())
}
