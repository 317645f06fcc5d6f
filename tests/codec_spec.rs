mod common;

use ebt_reader::ebt::codec::sixbit::{decode_server_to_string, decode_with, encode_with};
use ebt_reader::{decode, decode_server, decode_to_string, encode, Cursor, CLIENT, SERVER};

use common::{GOLDEN_CONFIG_TEXT, GOLDEN_INIT};

/// Request token captured from the host, with its plain text.
const HOST_TOKEN: &str = "0rUU0jkS2Lkd0qHW1qHd1qsd0jPS1LPT0qEd0jPS1LPT0qEX1T0S0jJADTxIBUtqBL0d1rUX2qvT2qsQ0jPW1jE50n==";
const HOST_TOKEN_TEXT: &str = "1-429289-16656-55-20240317-20240317073220_o2GgESd3-5-09439572066792";

#[test]
fn client_alphabet_carries_overrides() {
    assert_eq!(CLIENT.symbol(4), b'M');
    assert_eq!(CLIENT.symbol(6), b'O');
    assert_eq!(CLIENT.value(b'M'), Some(4));
    assert_eq!(CLIENT.value(b'O'), Some(6));
    assert_eq!(
        CLIENT.symbols(),
        b"PJKLMNOI3xyz012wvprqstuoHBCDEFGAnhijklmgfZabcdeYXRSTUVWQ!56789+4"
    );
}

#[test]
fn alphabets_are_distinct_permutations() {
    for table in [&CLIENT, &SERVER] {
        for value in 0..64u8 {
            let symbol = table.symbol(value);
            assert_eq!(table.value(symbol), Some(value), "symbol {:?}", symbol as char);
        }
        assert_eq!(table.value(b'='), None);
        assert_eq!(table.value(b'/'), None);
        assert_eq!(table.value(0xFF), None);
    }
    assert_ne!(CLIENT.symbols(), SERVER.symbols());
    assert_eq!(
        SERVER.symbols(),
        b"PJLKMNOI3xyz021wvrpqstouHCFBDEGAnhikjlmgfZbacedYRXTSUVQW!56789+4"
    );
}

#[test]
fn encode_matches_known_vectors() {
    assert_eq!(encode(b""), "");
    assert_eq!(encode(b"a"), "Hv==");
    assert_eq!(encode(b"ab"), "Hu3=");
    assert_eq!(encode(b"abc"), "Huxj");
    assert_eq!(encode(b"abcd"), "HuxjBP==");
    // Values 4 and 6 go through the overridden slots.
    assert_eq!(encode(&[0x10, 0x60]), "MOP=");
}

#[test]
fn encode_output_is_padded_to_quartets() {
    for len in 1..=32usize {
        let input: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
        let encoded = encode(&input);
        assert_eq!(encoded.len() % 4, 0, "length {}", len);
        assert_eq!(encoded.len(), len.div_ceil(3) * 4);
        let padding = encoded.chars().rev().take_while(|&c| c == '=').count();
        assert_eq!(padding, (3 - len % 3) % 3, "padding for length {}", len);
    }
}

#[test]
fn client_round_trip() {
    let long: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).take(301).collect();
    let inputs: [&[u8]; 5] = [b"", b"x", b"xy", b"xyz", &long];
    for input in inputs {
        assert_eq!(decode(&encode(input)), input, "length {}", input.len());
    }
}

#[test]
fn client_decodes_host_token() {
    assert_eq!(decode_to_string(HOST_TOKEN).unwrap(), HOST_TOKEN_TEXT);
    assert_eq!(encode(HOST_TOKEN_TEXT.as_bytes()), HOST_TOKEN);
}

#[test]
fn client_decode_skips_rest_of_incomplete_quartet() {
    assert_eq!(decode("Hv"), b"a");
    assert_eq!(decode("H"), b"");
    assert_eq!(decode("Hu3="), b"ab");
    // Padding only ends its own quartet.
    assert_eq!(decode("Hv==Huxj"), b"aabc");
    assert_eq!(decode("Hu3=Hv=="), b"aba");
    // An unknown symbol in the last two positions behaves like padding.
    assert_eq!(decode("Hu#jHuxj"), b"aabc");
    assert_eq!(decode("Hu#j"), b"a");
}

#[test]
fn client_decode_stops_on_gap_in_first_two_symbols() {
    assert_eq!(decode("#uxj"), b"");
    assert_eq!(decode("H#xjHuxj"), b"");
    assert_eq!(decode("HuxjH=xjHuxj"), b"abc");
}

#[test]
fn client_decode_rejects_invalid_utf8_text() {
    let encoded = encode(&[0xC3, 0x28, 0xFF]);
    assert!(matches!(
        decode_to_string(&encoded),
        Err(ebt_reader::EbtError::Decode(_))
    ));
}

#[test]
fn server_decodes_p_as_zero() {
    assert_eq!(SERVER.value(b'P'), Some(0));
    assert_eq!(decode_server("PJ"), [0x00u8]);
    assert_eq!(decode_server("PPPP"), [0x00u8, 0x00, 0x00]);
    // Looked up through the table, `P` contributes zero high bits.
    let with_p = decode_server("PwPP");
    let w = SERVER.value(b'w').unwrap();
    assert_eq!(with_p[0], w >> 4);
}

#[test]
fn server_decode_stops_on_first_two_symbols() {
    assert_eq!(decode_server(""), b"");
    assert_eq!(decode_server("=PPP"), b"");
    assert_eq!(decode_server("P=PPPPPP"), b"");
    assert_eq!(decode_server("PPP="), [0x00u8, 0x00]);
    assert_eq!(decode_server("PP=PJJJJ"), [0x00u8]);
}

#[test]
fn server_decodes_golden_config() {
    assert_eq!(decode_server_to_string(GOLDEN_INIT).unwrap(), GOLDEN_CONFIG_TEXT);
}

#[test]
fn server_alphabet_round_trips_through_generic_encoder() {
    let text = "pageInfo,1-2-3-4-5,中文";
    let encoded = encode_with(&SERVER, text.as_bytes());
    assert_eq!(decode_server(&encoded), text.as_bytes());
    assert_eq!(decode_with(&SERVER, &encoded), text.as_bytes());
    assert_ne!(encoded, encode(text.as_bytes()));
}

#[test]
fn cursor_reports_end_as_sentinel() {
    let cursor = Cursor::new(b"P=");
    let (first, cursor) = cursor.read_value(&CLIENT);
    assert_eq!(first, Some(0));
    let (second, cursor) = cursor.read_value(&CLIENT);
    assert_eq!(second, None);
    assert_eq!(cursor.position(), 2);
    assert!(cursor.is_at_end());
    let (third, cursor) = cursor.read_byte();
    assert_eq!(third, None);
    assert_eq!(cursor.position(), 2);
}
