extern crate algo_txn;
extern crate hex;
extern crate serde_json;
extern crate simple_logger;

use algo_txn::{
    crypto::verify_signature,
    mnemonic,
    msgpack::decode,
    transaction::{AssetParams, Participation, StateSchema},
    Address,
    ApplicationCall,
    AssetCreate,
    AssetTransfer,
    Error,
    Header,
    KeyPair,
    KeyRegistration,
    MicroAlgos,
    NetworkParams,
    Payment,
    Transaction,
};
use std::str::FromStr;

const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const PARAMS: &str = r#"{
    "consensus-version": "future",
    "fee": 0,
    "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
    "genesis-id": "testnet-v1.0",
    "last-round": 1000,
    "min-fee": 1000
}"#;

fn init_logger() {
    let _ = simple_logger::init_with_level(log::Level::Debug);
}

fn key() -> KeyPair {
    KeyPair::from_secret(&hex::decode(SEED).unwrap()).unwrap()
}

fn params() -> NetworkParams {
    serde_json::from_str(PARAMS).unwrap()
}

#[test]
fn should_sign_payment_from_network_params() {
    init_logger();
    let key = key();
    let receiver =
        Address::from_str("CEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEI7JH2AYM").unwrap();
    let tx = Transaction::new(
        params().header(key.address()),
        Payment::new(receiver, MicroAlgos(5_000_000)),
    )
    .unwrap();

    let signed = tx.sign(&key).unwrap();
    assert_eq!(signed.signature().0.len(), 64);
    assert_eq!(signed.id(), "EW46LZNRF4BQFPCKETL3TC2YSDAWMCKG523MORB4DAMO6Y5MSMBQ");
    assert_eq!(
        hex::encode(signed.signature().0),
        "4eaf5ba432e6dc53ff90c0f2d80f2c58bafc8b1b4b16270894c68ceae83d149e\
         555651eb0df983663a1769cd9826c4e985f86c6bcb8519ac6ae1b9feec4ce200"
    );
    assert!(signed.verify().is_ok());

    let again = tx.sign(&key).unwrap();
    assert_eq!(signed.encode().unwrap(), again.encode().unwrap());
}

#[test]
fn should_verify_against_prefixed_bytes() {
    let key = key();
    let tx = Transaction::new(
        params().header(key.address()),
        Payment::new(Address([0x11; 32]), MicroAlgos(1)),
    )
    .unwrap();
    let signed = tx.sign(&key).unwrap();
    let msg = tx.bytes_to_sign(None).unwrap();
    assert!(verify_signature(&key.address(), &msg, signed.signature()).is_ok());
    assert!(verify_signature(&key.address(), &tx.encode().unwrap(), signed.signature()).is_err());
}

#[test]
fn should_restore_key_from_mnemonic() {
    let key = key();
    let phrase = key.to_mnemonic();
    assert_eq!(phrase.split(' ').count(), mnemonic::MNEMONIC_WORDS);
    let restored = KeyPair::from_mnemonic(&phrase).unwrap();
    assert_eq!(restored.address(), key.address());
    assert_eq!(
        restored.address().to_string(),
        "25NJQAMCWEFLPVKL73J4SZAHHIHOC4XT3KTCGJNPAINGR5YHKENMEF5QTE"
    );
}

#[test]
fn should_reject_changed_mnemonic() {
    let phrase = key().to_mnemonic();
    let mut words: Vec<&str> = phrase.split(' ').collect();
    words[24] = if words[24] == "zoo" { "abandon" } else { "zoo" };
    match KeyPair::from_mnemonic(&words.join(" ")) {
        Err(Error::InvalidMnemonic(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn should_create_asset_and_opt_in() {
    let key = key();
    let create = Transaction::new(
        params().header(key.address()),
        AssetCreate::new(AssetParams {
            total: 1_000_000,
            decimals: 6,
            unit_name: "TST".to_string(),
            asset_name: "Test Asset".to_string(),
            url: "https://example.com".to_string(),
            ..AssetParams::default()
        }),
    )
    .unwrap();
    let value = decode(&create.encode().unwrap()).unwrap();
    let apar = value.as_map().unwrap().get("apar").unwrap().as_map().unwrap();
    assert!(!apar.contains_key("m"));
    assert!(!apar.contains_key("df"));

    let other = KeyPair::from_secret(&[9u8; 32]).unwrap();
    let opt_in = Transaction::new(
        params().header(other.address()),
        AssetTransfer::opt_in(12345, other.address()),
    )
    .unwrap();
    let value = decode(&opt_in.encode().unwrap()).unwrap();
    let map = value.as_map().unwrap();
    assert!(!map.contains_key("aamt"));
    assert_eq!(map.get("arcv"), map.get("snd"));
    assert!(opt_in.sign(&other).unwrap().verify().is_ok());
}

#[test]
fn should_encode_application_create() {
    let key = key();
    let tx = Transaction::new(
        params().header(key.address()).with_note(b"deploy"),
        ApplicationCall::create(
            vec![0x06, 0x81, 0x01],
            vec![0x06, 0x81, 0x01],
            StateSchema::new(0, 0),
            StateSchema::new(1, 1),
        ),
    )
    .unwrap();
    let value = decode(&tx.encode().unwrap()).unwrap();
    let map = value.as_map().unwrap();
    assert!(!map.contains_key("apid"));
    assert!(!map.contains_key("apgs"));
    assert!(map.contains_key("apls"));
    assert_eq!(map.get("type").and_then(|v| v.as_str()), Some("appl"));
}

#[test]
fn should_register_participation_keys() {
    let key = key();
    let online = Transaction::new(
        params().header(key.address()),
        KeyRegistration::online(Participation {
            vote_key: [1u8; 32],
            selection_key: [2u8; 32],
            state_proof_key: None,
            vote_first: 1000,
            vote_last: 3_000_000,
            key_dilution: 1733,
        }),
    )
    .unwrap();
    let offline = Transaction::new(params().header(key.address()), KeyRegistration::offline()).unwrap();
    let online_len = online.encode().unwrap().len();
    let offline_len = offline.encode().unwrap().len();
    assert!(online_len > offline_len);
    assert_ne!(online.id().unwrap(), offline.id().unwrap());
}

#[test]
fn should_keep_header_fields() {
    let header = Header::new(
        Address([1u8; 32]),
        MicroAlgos(1000),
        5,
        4,
        "testnet-v1.0",
        [1u8; 32],
    );
    let err = Transaction::new(header, Payment::new(Address([2u8; 32]), MicroAlgos(1))).unwrap_err();
    assert!(err.to_string().contains("first valid round"));
}
