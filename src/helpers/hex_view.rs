// Take in some bytes and return a hex view of them.
// Only used for logging, so nothing here has to be fast.

use std::fmt::Write;

pub(crate) fn hex_view(bytes: &[u8]) -> String {
    let mut screen_string = String::new();

    // push the header
    screen_string.push_str(" Offset(h)  00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F\n");

    for (line_number, line_bytes) in bytes.chunks(16).enumerate() {
        let offset = line_number * 16;
        // first goes the offset, padded so its 10 characters long
        let _ = write!(screen_string, "{offset:0>10X}  ");

        // now for all the numbers, padding out short lines
        for i in 0..16 {
            match line_bytes.get(i) {
                Some(byte) => {
                    let _ = write!(screen_string, "{byte:02X} ");
                }
                None => screen_string.push_str("   "),
            }
        }

        // now for the text version
        screen_string.push(' ');
        for byte in line_bytes {
            let character = char::from(*byte);
            if character.is_ascii_graphic() || character == ' ' {
                screen_string.push(character);
            } else {
                screen_string.push('.');
            }
        }

        // line is done.
        screen_string.push('\n');
    }

    // done!
    screen_string
}
