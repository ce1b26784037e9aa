use byteorder::{
    ByteOrder,
    NetworkEndian,
};

/// Accumulates the 16 bit words of a buffer into a one's complement sum, see
/// [RFC1071](https://tools.ietf.org/html/rfc1071).
///
/// The accumulator can be threaded through several calls to sum discontiguous
/// buffers. A trailing odd byte is treated as if padded with a zero byte.
/// Finalize the sum with a bitwise complement of the low 16 bits.
pub fn checksum(buffer: &[u8], acc: u32) -> u32 {
    let mut acc = fold(acc);

    for word in buffer.chunks(2) {
        let word = if word.len() == 2 {
            NetworkEndian::read_u16(word)
        } else {
            (word[0] as u16) << 8
        };

        acc += word as u32;
        if acc > 0xFFFF {
            acc -= 0xFFFF;
        }
    }

    acc
}

/// Calculates the finalized Internet Checksum of a buffer.
///
/// See [IPv4 header checksum](https://en.wikipedia.org/wiki/IPv4_header_checksum) for an example.
pub fn internet_checksum(buffer: &[u8]) -> u16 {
    !(checksum(buffer, 0) as u16)
}

fn fold(mut acc: u32) -> u32 {
    while acc > 0xFFFF {
        acc = (acc & 0xFFFF) + (acc >> 16);
    }
    acc
}
