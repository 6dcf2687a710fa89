use byteorder::{LittleEndian, ReadBytesExt};
use std::{fs, io::BufReader, path::Path};

/// Reads a program image as a stream of little-endian 16-bit words (spec
/// §6). Length is arbitrary; a trailing odd byte is treated as an error
/// rather than silently dropped.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Vec<u16>, std::io::Error> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut image = Vec::new();

    loop {
        match reader.read_u16::<LittleEndian>() {
            Ok(word) => image.push(word),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(image),
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_little_endian_words() {
        let mut path = std::env::temp_dir();
        path.push(format!("synacor-vm-test-{}.bin", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(&[65, 0, 0, 128]).unwrap(); // 0x0041, 0x8000
        }

        let image = read_image(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(image, vec![65, 32_768]);
    }
}
