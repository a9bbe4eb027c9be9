//! End-to-end ABI vectors over production curves: BN254, BLS12-381,
//! MNT4-298 and MNT6-298.

use num_bigint::BigUint;
use num_traits::Num;

use crate::api::run;
use crate::constants::*;
use crate::errors::ApiError;

// ---------------------------------------------------------------------------
// Encoding helpers
// ---------------------------------------------------------------------------

fn dec(s: &str) -> BigUint {
    BigUint::from_str_radix(s, 10).unwrap()
}

fn hex_num(s: &str) -> BigUint {
    BigUint::from_str_radix(s, 16).unwrap()
}

/// Big-endian, left-padded to `len` bytes.
fn be_bytes(value: &BigUint, len: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    assert!(raw.len() <= len, "value does not fit into {} bytes", len);
    let mut out = vec![0u8; len - raw.len()];
    out.extend_from_slice(&raw);
    out
}

/// Length-prefixed big-endian encoding (one length byte).
fn length_prefixed(value: &BigUint) -> Vec<u8> {
    let raw = value.to_bytes_be();
    let mut out = vec![raw.len() as u8];
    out.extend_from_slice(&raw);
    out
}

struct CurveDescription {
    modulus: BigUint,
    order: BigUint,
    a: BigUint,
    b: BigUint,
    mod_byte_len: usize,
    order_byte_len: usize,
}

impl CurveDescription {
    /// Shared curve header: mod_byte_len, modulus, a, b, order_len, order.
    fn encode_header(&self) -> Vec<u8> {
        let mut bytes = vec![self.mod_byte_len as u8];
        bytes.extend(be_bytes(&self.modulus, self.mod_byte_len));
        bytes.extend(be_bytes(&self.a, self.mod_byte_len));
        bytes.extend(be_bytes(&self.b, self.mod_byte_len));
        bytes.push(self.order_byte_len as u8);
        bytes.extend(be_bytes(&self.order, self.order_byte_len));
        bytes
    }

    fn encode_fp(&self, value: &BigUint) -> Vec<u8> {
        be_bytes(value, self.mod_byte_len)
    }

    fn encode_scalar(&self, value: &BigUint) -> Vec<u8> {
        be_bytes(value, self.order_byte_len)
    }

    fn negate_fp(&self, value: &BigUint) -> BigUint {
        if value == &BigUint::from(0u64) {
            BigUint::from(0u64)
        } else {
            &self.modulus - value
        }
    }
}

// ---------------------------------------------------------------------------
// Curve parameters
// ---------------------------------------------------------------------------

fn bn254() -> CurveDescription {
    CurveDescription {
        modulus: dec(
            "21888242871839275222246405745257275088696311157297823662689037894645226208583",
        ),
        order: dec(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617",
        ),
        a: dec("0"),
        b: dec("3"),
        mod_byte_len: 32,
        order_byte_len: 32,
    }
}

struct G2Point4 {
    x: [BigUint; 2],
    y: [BigUint; 2],
}

fn bn254_g2_generator() -> G2Point4 {
    G2Point4 {
        x: [
            dec("10857046999023057135944570762232829481370756359578518086990519993285655852781"),
            dec("11559732032986387107991004021392285783925812861821192530917403151452391805634"),
        ],
        y: [
            dec("8495653923123431417604973247489272438418190587263600148770280649306958101930"),
            dec("4082367875863433681332203403145435568316851327593401208105741076214120093531"),
        ],
    }
}

fn bls12_381() -> CurveDescription {
    CurveDescription {
        modulus: hex_num(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
        ),
        order: hex_num("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001"),
        a: dec("0"),
        b: dec("4"),
        mod_byte_len: 48,
        order_byte_len: 32,
    }
}

fn bls12_381_g1_generator() -> (BigUint, BigUint) {
    (
        hex_num("17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"),
        hex_num("08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"),
    )
}

fn bls12_381_g2_generator() -> G2Point4 {
    G2Point4 {
        x: [
            hex_num("024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"),
            hex_num("13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e"),
        ],
        y: [
            hex_num("0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801"),
            hex_num("0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be"),
        ],
    }
}

fn mnt4_298() -> CurveDescription {
    CurveDescription {
        modulus: dec(
            "475922286169261325753349249653048451545124879242694725395555128576210262817955800483758081",
        ),
        order: dec(
            "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137",
        ),
        a: dec("2"),
        b: dec(
            "423894536526684178289416011533888240029318103673896002803341544124054745019340795360841685",
        ),
        mod_byte_len: 38,
        order_byte_len: 38,
    }
}

fn mnt6_298() -> CurveDescription {
    CurveDescription {
        // the MNT4/MNT6 cycle swaps base field and scalar field
        modulus: dec(
            "475922286169261325753349249653048451545124878552823515553267735739164647307408490559963137",
        ),
        order: dec(
            "475922286169261325753349249653048451545124879242694725395555128576210262817955800483758081",
        ),
        a: dec("11"),
        b: dec(
            "106700080510851735677967319632585352256454251201367587890185989362936000262606668469523074",
        ),
        mod_byte_len: 38,
        order_byte_len: 38,
    }
}

// ---------------------------------------------------------------------------
// Input builders
// ---------------------------------------------------------------------------

fn g1_op_input(operation: u8, curve: &CurveDescription) -> Vec<u8> {
    let mut bytes = vec![operation];
    bytes.extend(curve.encode_header());
    bytes
}

fn bn254_pairing_input(pairs: &[((BigUint, BigUint), &G2Point4)]) -> Vec<u8> {
    let curve = bn254();
    let mut bytes = vec![OPERATION_PAIRING, CURVE_TYPE_BN];
    bytes.extend(curve.encode_header());
    // Fp2 non-residue: -1
    bytes.extend(curve.encode_fp(&(&curve.modulus - 1u64)));
    // Fp6 non-residue: 9 + u
    bytes.extend(curve.encode_fp(&dec("9")));
    bytes.extend(curve.encode_fp(&dec("1")));
    bytes.push(TWIST_TYPE_D);
    // u, positive
    bytes.extend(length_prefixed(&dec("4965661367192848881")));
    bytes.push(SIGN_PLUS);
    bytes.push(pairs.len() as u8);
    for ((px, py), q) in pairs.iter() {
        bytes.extend(curve.encode_fp(px));
        bytes.extend(curve.encode_fp(py));
        bytes.extend(curve.encode_fp(&q.x[0]));
        bytes.extend(curve.encode_fp(&q.x[1]));
        bytes.extend(curve.encode_fp(&q.y[0]));
        bytes.extend(curve.encode_fp(&q.y[1]));
    }
    bytes
}

fn bls12_381_pairing_input(pairs: &[((BigUint, BigUint), &G2Point4)]) -> Vec<u8> {
    let curve = bls12_381();
    let mut bytes = vec![OPERATION_PAIRING, CURVE_TYPE_BLS12];
    bytes.extend(curve.encode_header());
    // Fp2 non-residue: -1
    bytes.extend(curve.encode_fp(&(&curve.modulus - 1u64)));
    // Fp6 non-residue: 1 + u
    bytes.extend(curve.encode_fp(&dec("1")));
    bytes.extend(curve.encode_fp(&dec("1")));
    bytes.push(TWIST_TYPE_M);
    // x = -0xd201000000010000
    bytes.extend(length_prefixed(&hex_num("d201000000010000")));
    bytes.push(SIGN_MINUS);
    bytes.push(pairs.len() as u8);
    for ((px, py), q) in pairs.iter() {
        bytes.extend(curve.encode_fp(px));
        bytes.extend(curve.encode_fp(py));
        bytes.extend(curve.encode_fp(&q.x[0]));
        bytes.extend(curve.encode_fp(&q.x[1]));
        bytes.extend(curve.encode_fp(&q.y[0]));
        bytes.extend(curve.encode_fp(&q.y[1]));
    }
    bytes
}

// ---------------------------------------------------------------------------
// G1 arithmetic scenarios
// ---------------------------------------------------------------------------

#[test]
fn bn254_g1_add_generator_to_itself_matches_mul_by_two() {
    let curve = bn254();

    let mut add_input = g1_op_input(OPERATION_G1_ADD, &curve);
    for _ in 0..2 {
        add_input.extend(curve.encode_fp(&dec("1")));
        add_input.extend(curve.encode_fp(&dec("2")));
    }
    let added = run(&add_input).unwrap();
    assert_eq!(added.len(), 2 * curve.mod_byte_len);

    let mut mul_input = g1_op_input(OPERATION_G1_MUL, &curve);
    mul_input.extend(curve.encode_fp(&dec("1")));
    mul_input.extend(curve.encode_fp(&dec("2")));
    mul_input.extend(curve.encode_scalar(&dec("2")));
    let doubled = run(&mul_input).unwrap();

    assert_eq!(added, doubled);
}

#[test]
fn bn254_g1_add_zero_is_identity() {
    let curve = bn254();

    let mut input = g1_op_input(OPERATION_G1_ADD, &curve);
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("2")));
    input.extend(curve.encode_fp(&dec("0")));
    input.extend(curve.encode_fp(&dec("0")));
    let result = run(&input).unwrap();

    let mut expected = curve.encode_fp(&dec("1"));
    expected.extend(curve.encode_fp(&dec("2")));
    assert_eq!(result, expected);
}

#[test]
fn bn254_g1_add_point_to_its_negative_is_zero() {
    let curve = bn254();

    let mut input = g1_op_input(OPERATION_G1_ADD, &curve);
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("2")));
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&curve.negate_fp(&dec("2"))));
    let result = run(&input).unwrap();

    assert!(result.iter().all(|byte| *byte == 0));
}

#[test]
fn bn254_g1_multiexp_equals_mul_by_scalar_sum() {
    let curve = bn254();

    // 1*G + 2*G + 3*G
    let mut multiexp_input = g1_op_input(OPERATION_G1_MULTIEXP, &curve);
    multiexp_input.push(3);
    for scalar in ["1", "2", "3"] {
        multiexp_input.extend(curve.encode_fp(&dec("1")));
        multiexp_input.extend(curve.encode_fp(&dec("2")));
        multiexp_input.extend(curve.encode_scalar(&dec(scalar)));
    }
    let summed = run(&multiexp_input).unwrap();

    let mut mul_input = g1_op_input(OPERATION_G1_MUL, &curve);
    mul_input.extend(curve.encode_fp(&dec("1")));
    mul_input.extend(curve.encode_fp(&dec("2")));
    mul_input.extend(curve.encode_scalar(&dec("6")));
    let expected = run(&mul_input).unwrap();

    assert_eq!(summed, expected);
}

#[test]
fn bn254_g1_single_pair_multiexp_equals_mul() {
    let curve = bn254();
    let scalar = dec("987654321987654321");

    let mut multiexp_input = g1_op_input(OPERATION_G1_MULTIEXP, &curve);
    multiexp_input.push(1);
    multiexp_input.extend(curve.encode_fp(&dec("1")));
    multiexp_input.extend(curve.encode_fp(&dec("2")));
    multiexp_input.extend(curve.encode_scalar(&scalar));

    let mut mul_input = g1_op_input(OPERATION_G1_MUL, &curve);
    mul_input.extend(curve.encode_fp(&dec("1")));
    mul_input.extend(curve.encode_fp(&dec("2")));
    mul_input.extend(curve.encode_scalar(&scalar));

    assert_eq!(run(&multiexp_input).unwrap(), run(&mul_input).unwrap());
}

#[test]
fn bn254_g1_mul_by_order_minus_one_is_negative() {
    let curve = bn254();

    let mut mul_input = g1_op_input(OPERATION_G1_MUL, &curve);
    mul_input.extend(curve.encode_fp(&dec("1")));
    mul_input.extend(curve.encode_fp(&dec("2")));
    mul_input.extend(curve.encode_scalar(&(&curve.order - 1u64)));
    let result = run(&mul_input).unwrap();

    let mut expected = curve.encode_fp(&dec("1"));
    expected.extend(curve.encode_fp(&curve.negate_fp(&dec("2"))));
    assert_eq!(result, expected);
}

#[test]
fn bn254_g1_scalar_equal_to_order_is_rejected() {
    let curve = bn254();

    let mut mul_input = g1_op_input(OPERATION_G1_MUL, &curve);
    mul_input.extend(curve.encode_fp(&dec("1")));
    mul_input.extend(curve.encode_fp(&dec("2")));
    mul_input.extend(curve.encode_scalar(&curve.order));

    match run(&mul_input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("order is less or equal scalar"))
        }
        other => panic!("expected scalar rejection, got {:?}", other),
    }
}

#[test]
fn bn254_g2_add_matches_mul_by_two() {
    let curve = bn254();
    let g2 = bn254_g2_generator();
    // b' = 3 / (9 + u) on the D-twist
    let b2 = (
        dec("19485874751759354771024239261021720505790618469301721065564631296452457478373"),
        dec("266929791119991161246907387137283842545076965332900288569378510910307636690"),
    );

    // G2 layout: op, mod_byte_len, modulus, ext degree, non-residue, curve
    let mut input = vec![OPERATION_G2_ADD];
    input.push(curve.mod_byte_len as u8);
    input.extend(be_bytes(&curve.modulus, curve.mod_byte_len));
    input.push(EXTENSION_DEGREE_2);
    // Fp2 non-residue = -1
    input.extend(curve.encode_fp(&(&curve.modulus - 1u64)));
    // a' = 0, b' as Fp2
    input.extend(curve.encode_fp(&dec("0")));
    input.extend(curve.encode_fp(&dec("0")));
    input.extend(curve.encode_fp(&b2.0));
    input.extend(curve.encode_fp(&b2.1));
    input.push(curve.order_byte_len as u8);
    input.extend(be_bytes(&curve.order, curve.order_byte_len));

    let mut add_input = input.clone();
    for _ in 0..2 {
        add_input.extend(curve.encode_fp(&g2.x[0]));
        add_input.extend(curve.encode_fp(&g2.x[1]));
        add_input.extend(curve.encode_fp(&g2.y[0]));
        add_input.extend(curve.encode_fp(&g2.y[1]));
    }
    let added = run(&add_input).unwrap();
    assert_eq!(added.len(), 4 * curve.mod_byte_len);

    let mut mul_input = input;
    mul_input[0] = OPERATION_G2_MUL;
    mul_input.extend(curve.encode_fp(&g2.x[0]));
    mul_input.extend(curve.encode_fp(&g2.x[1]));
    mul_input.extend(curve.encode_fp(&g2.y[0]));
    mul_input.extend(curve.encode_fp(&g2.y[1]));
    mul_input.extend(curve.encode_scalar(&dec("2")));
    let doubled = run(&mul_input).unwrap();

    assert_eq!(added, doubled);
}

// ---------------------------------------------------------------------------
// Pairing scenarios
// ---------------------------------------------------------------------------

#[test]
fn bn254_pairing_of_generators_is_not_identity() {
    let g2 = bn254_g2_generator();
    let input = bn254_pairing_input(&[((dec("1"), dec("2")), &g2)]);
    assert_eq!(run(&input).unwrap(), vec![0]);
}

#[test]
fn bn254_pairing_cancels_with_negated_point() {
    let curve = bn254();
    let g2 = bn254_g2_generator();
    let pairs = [
        ((dec("1"), dec("2")), &g2),
        ((dec("1"), curve.negate_fp(&dec("2"))), &g2),
    ];
    let input = bn254_pairing_input(&pairs);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

#[test]
fn bn254_pairing_with_zero_g1_point_is_identity() {
    let g2 = bn254_g2_generator();
    let input = bn254_pairing_input(&[((dec("0"), dec("0")), &g2)]);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

#[test]
fn bls12_381_pairing_with_zero_points_is_identity() {
    let g2 = bls12_381_g2_generator();
    // e(0, Q) = 1
    let input = bls12_381_pairing_input(&[((dec("0"), dec("0")), &g2)]);
    assert_eq!(run(&input).unwrap(), vec![1]);

    // e(P, 0) = 1
    let zero_g2 = G2Point4 {
        x: [dec("0"), dec("0")],
        y: [dec("0"), dec("0")],
    };
    let g1 = bls12_381_g1_generator();
    let input = bls12_381_pairing_input(&[(g1, &zero_g2)]);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

#[test]
fn bls12_381_pairing_of_generators_is_not_identity() {
    let g1 = bls12_381_g1_generator();
    let g2 = bls12_381_g2_generator();
    let input = bls12_381_pairing_input(&[(g1, &g2)]);
    assert_eq!(run(&input).unwrap(), vec![0]);
}

#[test]
fn bls12_381_pairing_cancels_with_negated_point() {
    let curve = bls12_381();
    let (gx, gy) = bls12_381_g1_generator();
    let g2 = bls12_381_g2_generator();
    let pairs = [
        ((gx.clone(), gy.clone()), &g2),
        ((gx, curve.negate_fp(&gy)), &g2),
    ];
    let input = bls12_381_pairing_input(&pairs);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

struct MntPairingFixture {
    curve: CurveDescription,
    non_residue: BigUint,
    x: BigUint,
    x_sign: u8,
    exp_w0: BigUint,
    exp_w1: BigUint,
    exp_w0_sign: u8,
    g1: (BigUint, BigUint),
    g2_x: Vec<BigUint>,
    g2_y: Vec<BigUint>,
}

impl MntPairingFixture {
    fn encode(&self, curve_type: u8, pairs: &[((BigUint, BigUint), (&[BigUint], &[BigUint]))]) -> Vec<u8> {
        let mut bytes = vec![OPERATION_PAIRING, curve_type];
        bytes.extend(self.curve.encode_header());
        bytes.extend(self.curve.encode_fp(&self.non_residue));
        bytes.extend(length_prefixed(&self.x));
        bytes.push(self.x_sign);
        bytes.extend(length_prefixed(&self.exp_w0));
        bytes.extend(length_prefixed(&self.exp_w1));
        bytes.push(self.exp_w0_sign);
        bytes.push(pairs.len() as u8);
        for ((px, py), (qx, qy)) in pairs.iter() {
            bytes.extend(self.curve.encode_fp(px));
            bytes.extend(self.curve.encode_fp(py));
            for c in qx.iter() {
                bytes.extend(self.curve.encode_fp(c));
            }
            for c in qy.iter() {
                bytes.extend(self.curve.encode_fp(c));
            }
        }
        bytes
    }
}

fn mnt4_298_fixture() -> MntPairingFixture {
    MntPairingFixture {
        curve: mnt4_298(),
        non_residue: dec("17"),
        x: dec("689871209842287392837045615510547309923794944"),
        x_sign: SIGN_PLUS,
        exp_w0: dec("689871209842287392837045615510547309923794945"),
        exp_w1: dec("1"),
        exp_w0_sign: SIGN_PLUS,
        g1: (
            dec("60760244141852568949126569781626075788424196370144486719385562369396875346601926534016838"),
            dec("363732850702582978263902770815145784459747722357071843971107674179038674942891694705904306"),
        ),
        g2_x: vec![
            dec("438374926219350099854919100077809681842783509163790991847867546339851681564223481322252708"),
            dec("37620953615500480110935514360923278605464476459712393277679280819942849043649216370485641"),
        ],
        g2_y: vec![
            dec("37437409008528968268352521034936931842973546441370663118543015118291998305624025037512482"),
            dec("424621479598893882672393190337420680597584695892317197646113820787463109735345923009077489"),
        ],
    }
}

fn mnt6_298_fixture() -> MntPairingFixture {
    // x = 0x1eef55_46609756bec2a33f_0dc9a1b671660000, negative
    let x = hex_num("1eef5546609756bec2a33f0dc9a1b671660000");
    MntPairingFixture {
        curve: mnt6_298(),
        non_residue: dec("5"),
        x: x.clone(),
        x_sign: SIGN_MINUS,
        exp_w0: x,
        exp_w1: dec("1"),
        exp_w0_sign: SIGN_MINUS,
        g1: (
            dec("336685752883082228109289846353937104185698209371404178342968838739115829740084426881123453"),
            dec("402596290139780989709332707716568920777622032073762749862342374583908837063963736098549800"),
        ),
        g2_x: vec![
            dec("421456435772811846256826561593908322288509115489119907560382401870203318738334702321297427"),
            dec("103072927438548502463527009961344915021167584706439945404959058962657261178393635706405114"),
            dec("143029172143731852627002926324735183809768363301149009204849580478324784395590388826052558"),
        ],
        g2_y: vec![
            dec("464673596668689463130099227575639512541218133445388869383893594087634649237515554342751377"),
            dec("100642907501977375184575075967118071807821117960152743335603284583254620685343989304941678"),
            dec("123019855502969896026940545715841181300275180157288044663051565390506010149881373807142903"),
        ],
    }
}

#[test]
fn mnt4_298_pairing_cancels_with_negated_point() {
    let fixture = mnt4_298_fixture();
    let (px, py) = fixture.g1.clone();
    let neg_py = fixture.curve.negate_fp(&py);
    let pairs = [
        ((px.clone(), py), (&fixture.g2_x[..], &fixture.g2_y[..])),
        ((px, neg_py), (&fixture.g2_x[..], &fixture.g2_y[..])),
    ];
    let input = fixture.encode(CURVE_TYPE_MNT4, &pairs);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

#[test]
fn mnt4_298_pairing_of_generators_is_not_identity() {
    let fixture = mnt4_298_fixture();
    let pairs = [(
        fixture.g1.clone(),
        (&fixture.g2_x[..], &fixture.g2_y[..]),
    )];
    let input = fixture.encode(CURVE_TYPE_MNT4, &pairs);
    assert_eq!(run(&input).unwrap(), vec![0]);
}

#[test]
fn mnt6_298_pairing_cancels_with_negated_point() {
    let fixture = mnt6_298_fixture();
    let (px, py) = fixture.g1.clone();
    let neg_py = fixture.curve.negate_fp(&py);
    let pairs = [
        ((px.clone(), py), (&fixture.g2_x[..], &fixture.g2_y[..])),
        ((px, neg_py), (&fixture.g2_x[..], &fixture.g2_y[..])),
    ];
    let input = fixture.encode(CURVE_TYPE_MNT6, &pairs);
    assert_eq!(run(&input).unwrap(), vec![1]);
}

#[test]
fn mnt6_298_pairing_of_generators_is_not_identity() {
    let fixture = mnt6_298_fixture();
    let pairs = [(
        fixture.g1.clone(),
        (&fixture.g2_x[..], &fixture.g2_y[..]),
    )];
    let input = fixture.encode(CURVE_TYPE_MNT6, &pairs);
    assert_eq!(run(&input).unwrap(), vec![0]);
}

// ---------------------------------------------------------------------------
// Malformed inputs
// ---------------------------------------------------------------------------

#[test]
fn truncated_input_reports_length_error() {
    let curve = bn254();
    let mut input = g1_op_input(OPERATION_G1_ADD, &curve);
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("2")));
    input.extend(curve.encode_fp(&dec("1")));
    let mut y = curve.encode_fp(&dec("2"));
    y.pop(); // drop the last byte of the second point
    input.extend(y);

    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("not long enough"), "got: {}", descr)
        }
        other => panic!("expected truncation error, got {:?}", other),
    }
}

#[test]
fn modulus_with_leading_zero_byte_is_rejected() {
    let curve = bn254();
    let mut input = vec![OPERATION_G1_ADD];
    input.push((curve.mod_byte_len + 1) as u8);
    input.push(0);
    input.extend(be_bytes(&curve.modulus, curve.mod_byte_len));
    // curve parameters would follow, but the error fires first

    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("modulus"), "got: {}", descr)
        }
        other => panic!("expected modulus encoding error, got {:?}", other),
    }
}

#[test]
fn even_modulus_is_rejected() {
    let mut input = vec![OPERATION_G1_ADD, 1, 4];
    input.extend(vec![0u8; 16]);
    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => assert!(descr.contains("even"), "got: {}", descr),
        other => panic!("expected even-modulus error, got {:?}", other),
    }
}

#[test]
fn unknown_operation_is_rejected() {
    assert!(matches!(run(&[0x2a]), Err(ApiError::InvalidInput(_))));
    assert!(matches!(run(&[]), Err(ApiError::InvalidInput(_))));
}

#[test]
fn unknown_curve_type_is_rejected() {
    assert!(matches!(
        run(&[OPERATION_PAIRING, 0x09]),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn multiexp_with_wrong_total_length_is_rejected() {
    let curve = bn254();
    let mut input = g1_op_input(OPERATION_G1_MULTIEXP, &curve);
    input.push(2); // two pairs declared
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("2")));
    input.extend(curve.encode_scalar(&dec("1")));
    // second pair missing

    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("number of pairs"), "got: {}", descr)
        }
        other => panic!("expected pair-length error, got {:?}", other),
    }
}

#[test]
fn trailing_garbage_is_rejected() {
    let curve = bn254();
    let mut input = g1_op_input(OPERATION_G1_ADD, &curve);
    for _ in 0..2 {
        input.extend(curve.encode_fp(&dec("1")));
        input.extend(curve.encode_fp(&dec("2")));
    }
    input.push(0xff);

    assert!(matches!(run(&input), Err(ApiError::InvalidInput(_))));
}

#[test]
fn point_off_curve_is_rejected() {
    let curve = bn254();
    let mut input = g1_op_input(OPERATION_G1_ADD, &curve);
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("3"))); // (1, 3) is not on y^2 = x^3 + 3
    input.extend(curve.encode_fp(&dec("1")));
    input.extend(curve.encode_fp(&dec("2")));

    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("not on curve"), "got: {}", descr)
        }
        other => panic!("expected on-curve rejection, got {:?}", other),
    }
}

#[test]
fn invalid_sign_byte_is_rejected() {
    let g2 = bn254_g2_generator();
    let mut input = bn254_pairing_input(&[((dec("1"), dec("2")), &g2)]);
    // the sign byte sits right after the length-prefixed u (8 bytes)
    let curve = bn254();
    let sign_position = 2 // op + curve type
        + 1 + curve.mod_byte_len // modulus
        + 2 * curve.mod_byte_len // a, b
        + 1 + curve.order_byte_len // order
        + curve.mod_byte_len // fp2 non-residue
        + 2 * curve.mod_byte_len // fp6 non-residue
        + 1 // twist type
        + 1 + 8; // u
    input[sign_position] = 0x05;

    match run(&input) {
        Err(ApiError::InvalidInput(descr)) => {
            assert!(descr.contains("sign"), "got: {}", descr)
        }
        other => panic!("expected sign rejection, got {:?}", other),
    }
}
