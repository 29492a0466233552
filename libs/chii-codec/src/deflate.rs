use flate2::{Decompress, FlushDecompress, Status};

use chii_api::CodecError;

const MIN_CHUNK: usize = 4 * 1024;

/// Inflate a raw DEFLATE stream (no zlib/gzip header, no checksum).
///
/// Output larger than `max_output` fails with `LimitExceeded` as soon as the
/// ceiling is crossed. A stream that ends before its final block fails with
/// `Decompression`. Bytes after the end of the stream are ignored.
pub fn inflate_raw(data: &[u8], max_output: usize) -> Result<Vec<u8>, CodecError> {
    let mut inflater = Decompress::new(false);
    let initial = data.len().saturating_mul(4).max(MIN_CHUNK).min(max_output.saturating_add(1));
    let mut out: Vec<u8> = Vec::with_capacity(initial);

    loop {
        if out.len() == out.capacity() {
            if out.len() > max_output {
                return Err(CodecError::LimitExceeded { limit: "inflated size", max: max_output });
            }
            // Leave room for exactly one byte past the ceiling so overflow is observable.
            let grow = out.len().max(MIN_CHUNK).min(max_output.saturating_add(1) - out.len());
            out.reserve_exact(grow);
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let consumed = in_before as usize;

        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| CodecError::Decompression(e.to_string()))?;

        if status == Status::StreamEnd {
            break;
        }

        let progressed = inflater.total_in() != in_before || inflater.total_out() != out_before;
        if !progressed && out.len() < out.capacity() {
            return Err(CodecError::Decompression(format!(
                "truncated stream after {} input bytes",
                inflater.total_in()
            )));
        }
    }

    if out.len() > max_output {
        return Err(CodecError::LimitExceeded { limit: "inflated size", max: max_output });
    }
    Ok(out)
}
