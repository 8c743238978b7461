use std::fs;
use std::path::{Path, PathBuf};

use rfsense_core::BitBuffer;
use rfsense_core::bits::manchester;
use rfsense_core::protocols::diy_temp::layout;
use rfsense_core::protocols::diy_temp::{PayloadFields, encode_frame};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(&root.join("scenario"), &[scenario_frame().to_string()])?;
    write_fixture(&root.join("mixed"), &mixed_lines())?;
    Ok(())
}

fn scenario_frame() -> BitBuffer {
    encode_frame(
        &PayloadFields {
            id: 5,
            temperatures: [2500, -50, 0, 100],
            vbatt: 370,
            crc: 0,
        }
        .to_bytes(),
    )
}

fn mixed_lines() -> Vec<String> {
    let first = encode_frame(
        &PayloadFields {
            id: 1,
            temperatures: [2150, 2200, -125, 1999],
            vbatt: 295,
            crc: 0,
        }
        .to_bytes(),
    );

    let scenario = scenario_frame();
    let mut two_rows = scenario.clone();
    two_rows.push_row(scenario.row(0), scenario.bits_per_row(0));

    let mut broken = BitBuffer::from_row(layout::PREAMBLE_SYNC, layout::PREAMBLE_SYNC_BITS);
    let inverted: Vec<u8> = [5u8, 0x09, 0xc4, 0xff, 0xce, 0x00]
        .iter()
        .map(|byte| !byte)
        .collect();
    manchester::encode_into(&mut broken, &inverted, inverted.len() * 8);
    broken.add_bits(&[0u8; 14], 112);

    let shifted_frame = encode_frame(
        &PayloadFields {
            id: 2,
            temperatures: [-1000, 0, 3276, -3276],
            vbatt: 412,
            crc: 0,
        }
        .to_bytes(),
    );
    let mut shifted = BitBuffer::from_row(&[0b1010_0000], 3);
    shifted.add_bits(shifted_frame.row(0), shifted_frame.bits_per_row(0));

    vec![
        "# rfsense fixture: mixed captures".to_string(),
        first.to_string(),
        two_rows.to_string(),
        BitBuffer::from_row(&[0u8; 8], 64).to_string(),
        String::new(),
        BitBuffer::from_row(layout::PREAMBLE_SYNC, layout::PREAMBLE_SYNC_BITS).to_string(),
        format!("{}  # manchester violation after six bytes", broken),
        shifted.to_string(),
    ]
}

fn write_fixture(dir: &Path, lines: &[String]) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    let path = dir.join("input.txt");
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).map_err(|e| format!("write {}: {e}", path.display()))?;
    Ok(())
}
