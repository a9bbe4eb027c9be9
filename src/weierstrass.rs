//! Short Weierstrass curves over arbitrary field elements and their group
//! law in Jacobian coordinates.

use crate::traits::FieldElement;

/// Shape specialization computed from the coefficients at construction.
/// Only `Generic` and `AIsZero` are live; the other shapes are reserved for
/// specializations this engine does not emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveShape {
    Generic,
    AIsMinus3,
    AIsZero,
    BIsZero,
}

/// y^2 = x^3 + a*x + b over the element type E, together with the subgroup
/// order the scalar operations are bounded by.
pub struct WeierstrassCurve<E: FieldElement> {
    pub(crate) a: E,
    pub(crate) b: E,
    subgroup_order: Vec<u64>,
    order_len: usize,
    shape: CurveShape,
}

impl<E: FieldElement> WeierstrassCurve<E> {
    pub fn new(a: E, b: E, subgroup_order: Vec<u64>, order_len: usize) -> Self {
        let shape = if a.is_zero() {
            CurveShape::AIsZero
        } else {
            CurveShape::Generic
        };
        Self {
            a,
            b,
            subgroup_order,
            order_len,
            shape,
        }
    }

    #[inline]
    pub fn a(&self) -> &E {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &E {
        &self.b
    }

    #[inline]
    pub fn subgroup_order(&self) -> &[u64] {
        &self.subgroup_order
    }

    /// Byte length of the order as it appeared on the wire; scalars are
    /// decoded with the same width.
    #[inline]
    pub fn order_len(&self) -> usize {
        self.order_len
    }

    #[inline]
    pub fn shape(&self) -> CurveShape {
        self.shape
    }
}

/// A point in Jacobian coordinates: the affine point is (x/z^2, y/z^3) and
/// infinity is encoded as z = 0.
pub struct CurvePoint<E: FieldElement> {
    pub x: E,
    pub y: E,
    pub z: E,
}

impl<E: FieldElement> Clone for CurvePoint<E> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: FieldElement> Copy for CurvePoint<E> {}

impl<E: FieldElement> std::fmt::Debug for CurvePoint<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CurvePoint({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl<E: FieldElement> CurvePoint<E> {
    /// Affine constructor; (0, 0) is the conventional encoding of infinity.
    pub fn from_xy(x: E, y: E) -> Self {
        if x.is_zero() && y.is_zero() {
            Self {
                x: x.zero_like(),
                y: x.one_like(),
                z: x.zero_like(),
            }
        } else {
            Self {
                x,
                y,
                z: x.one_like(),
            }
        }
    }

    /// The point at infinity, with field context borrowed from `like`.
    pub fn zero(like: &E) -> Self {
        Self {
            x: like.zero_like(),
            y: like.one_like(),
            z: like.zero_like(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.z.is_zero()
    }

    pub fn is_normalized(&self) -> bool {
        self.is_zero() || self.z == self.z.one_like()
    }

    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.y.negate();
        }
    }

    /// Affine coordinates; infinity reads as (0, 0). Performs the one field
    /// inversion this type ever needs.
    pub fn xy(&self) -> (E, E) {
        if self.is_zero() {
            return (self.x.zero_like(), self.x.zero_like());
        }

        let mut point = *self;
        point.normalize();
        (point.x, point.y)
    }

    pub fn normalize(&mut self) {
        if self.is_zero() {
            return;
        }
        let one = self.x.one_like();
        if self.z == one {
            return;
        }

        // An unnormalizable z cannot appear from valid inputs; treat it as zero.
        let z_inv = match self.z.inverse() {
            Some(inv) => inv,
            None => self.x.zero_like(),
        };
        let mut zinv_powered = z_inv;
        zinv_powered.square();

        // X / Z^2
        self.x.mul_assign(&zinv_powered);

        // Y / Z^3
        zinv_powered.mul_assign(&z_inv);
        self.y.mul_assign(&zinv_powered);

        self.z = one;
    }

    pub fn check_on_curve(&self, curve: &WeierstrassCurve<E>) -> bool {
        if self.is_zero() {
            return true;
        }

        let mut rhs = self.y;
        rhs.square();

        let mut lhs = *curve.b();
        let mut ax = self.x;
        ax.mul_assign(curve.a());
        lhs.add_assign(&ax);

        let mut x_3 = self.x;
        x_3.square();
        x_3.mul_assign(&self.x);
        lhs.add_assign(&x_3);

        rhs == lhs
    }

    /// Order times the point must be infinity.
    pub fn check_correct_subgroup(&self, curve: &WeierstrassCurve<E>) -> bool {
        self.mul(curve.subgroup_order(), curve).is_zero()
    }

    pub fn serialize_into(
        &self,
        mod_byte_len: usize,
        output: &mut Vec<u8>,
    ) {
        let (x, y) = self.xy();
        x.serialize_into(mod_byte_len, output);
        y.serialize_into(mod_byte_len, output);
    }

    /// Doubling, specialized on the curve shape.
    pub fn mul2(&mut self, curve: &WeierstrassCurve<E>) {
        match curve.shape() {
            CurveShape::Generic => self.mul2_generic(curve),
            CurveShape::AIsZero => self.mul2_a_is_zero(),
            // construction only ever produces the two shapes above
            _ => unreachable!("reserved curve shape"),
        }
    }

    /// dbl-2007-bl, carrying the a-coefficient term.
    fn mul2_generic(&mut self, curve: &WeierstrassCurve<E>) {
        if self.is_zero() {
            return;
        }

        // A = X1^2
        let mut a = self.x;
        a.square();

        // B = Y1^2
        let mut b = self.y;
        b.square();

        // C = B^2
        let mut c = b;
        c.square();

        let mut z_2 = self.z;
        z_2.square();

        // D = 2*((X1+B)^2 - A - C)
        let mut d = self.x;
        d.add_assign(&b);
        d.square();
        d.sub_assign(&a);
        d.sub_assign(&c);
        d.double();

        // E = 3*A + a*Z^4
        let mut e = a;
        e.double();
        e.add_assign(&a);

        let mut a_z_4 = z_2;
        a_z_4.square();
        a_z_4.mul_assign(curve.a());

        e.add_assign(&a_z_4);

        // X3 = E^2 - 2*D
        let mut t = d;
        t.double();

        let mut f = e;
        f.square();
        f.sub_assign(&t);

        self.x = f;

        // Z3 = (Y1+Z1)^2 - B - Z^2
        self.z.add_assign(&self.y);
        self.z.square();
        self.z.sub_assign(&b);
        self.z.sub_assign(&z_2);

        // Y3 = E*(D-X3) - 8*C
        self.y = d;
        self.y.sub_assign(&self.x);
        self.y.mul_assign(&e);
        c.double();
        c.double();
        c.double();
        self.y.sub_assign(&c);
    }

    /// dbl-2009-l, valid when a = 0.
    fn mul2_a_is_zero(&mut self) {
        if self.is_zero() {
            return;
        }

        // A = X1^2
        let mut a = self.x;
        a.square();

        // B = Y1^2
        let mut b = self.y;
        b.square();

        // C = B^2
        let mut c = b;
        c.square();

        // D = 2*((X1+B)^2 - A - C)
        let mut d = self.x;
        d.add_assign(&b);
        d.square();
        d.sub_assign(&a);
        d.sub_assign(&c);
        d.double();

        // E = 3*A
        let mut e = a;
        e.double();
        e.add_assign(&a);

        // F = E^2
        let mut f = e;
        f.square();

        // Z3 = 2*Y1*Z1
        self.z.mul_assign(&self.y);
        self.z.double();

        // X3 = F - 2*D
        self.x = f;
        self.x.sub_assign(&d);
        self.x.sub_assign(&d);

        // Y3 = E*(D-X3) - 8*C
        self.y = d;
        self.y.sub_assign(&self.x);
        self.y.mul_assign(&e);
        c.double();
        c.double();
        c.double();
        self.y.sub_assign(&c);
    }

    /// Full Jacobian addition, add-2007-bl. Falls through to the mixed
    /// formula when the right operand is affine.
    pub fn add_assign(&mut self, other: &Self, curve: &WeierstrassCurve<E>) {
        if self.is_zero() {
            *self = *other;
            return;
        } else if other.is_zero() {
            return;
        }

        if other.z == other.z.one_like() {
            self.add_assign_mixed(other, curve);
            return;
        }

        // Z1Z1 = Z1^2
        let mut z1z1 = self.z;
        z1z1.square();

        // Z2Z2 = Z2^2
        let mut z2z2 = other.z;
        z2z2.square();

        // U1 = X1*Z2Z2
        let mut u1 = self.x;
        u1.mul_assign(&z2z2);

        // U2 = X2*Z1Z1
        let mut u2 = other.x;
        u2.mul_assign(&z1z1);

        // S1 = Y1*Z2*Z2Z2
        let mut s1 = self.y;
        s1.mul_assign(&other.z);
        s1.mul_assign(&z2z2);

        // S2 = Y2*Z1*Z1Z1
        let mut s2 = other.y;
        s2.mul_assign(&self.z);
        s2.mul_assign(&z1z1);

        if u1 == u2 && s1 == s2 {
            // same point
            self.mul2(curve);
            return;
        }

        if u1 == u2 {
            // inverse points, H would vanish
            *self = Self::zero(&self.x);
            return;
        }

        // H = U2-U1
        let mut h = u2;
        h.sub_assign(&u1);

        // I = (2*H)^2
        let mut i = h;
        i.double();
        i.square();

        // J = H*I
        let mut j = h;
        j.mul_assign(&i);

        // r = 2*(S2-S1)
        let mut r = s2;
        r.sub_assign(&s1);
        r.double();

        // V = U1*I
        let mut v = u1;
        v.mul_assign(&i);

        // X3 = r^2 - J - 2*V
        self.x = r;
        self.x.square();
        self.x.sub_assign(&j);
        self.x.sub_assign(&v);
        self.x.sub_assign(&v);

        // Y3 = r*(V - X3) - 2*S1*J
        self.y = v;
        self.y.sub_assign(&self.x);
        self.y.mul_assign(&r);
        s1.mul_assign(&j);
        s1.double();
        self.y.sub_assign(&s1);

        // Z3 = ((Z1+Z2)^2 - Z1Z1 - Z2Z2)*H
        self.z.add_assign(&other.z);
        self.z.square();
        self.z.sub_assign(&z1z1);
        self.z.sub_assign(&z2z2);
        self.z.mul_assign(&h);
    }

    /// Mixed addition, madd-2007-bl; the right operand must have z = 1
    /// (falls back to the full formula otherwise).
    pub fn add_assign_mixed(&mut self, other: &Self, curve: &WeierstrassCurve<E>) {
        if other.is_zero() {
            return;
        }

        if self.is_zero() {
            *self = *other;
            return;
        }

        if other.z != other.z.one_like() {
            self.add_assign(other, curve);
            return;
        }

        // Z1Z1 = Z1^2
        let mut z1z1 = self.z;
        z1z1.square();

        // U2 = X2*Z1Z1
        let mut u2 = other.x;
        u2.mul_assign(&z1z1);

        // S2 = Y2*Z1*Z1Z1
        let mut s2 = other.y;
        s2.mul_assign(&self.z);
        s2.mul_assign(&z1z1);

        if self.x == u2 && self.y == s2 {
            self.mul2(curve);
            return;
        }

        if self.x == u2 {
            *self = Self::zero(&self.x);
            return;
        }

        // H = U2-X1
        let mut h = u2;
        h.sub_assign(&self.x);

        // HH = H^2
        let mut hh = h;
        hh.square();

        // I = 4*HH
        let mut i = hh;
        i.double();
        i.double();

        // J = H*I
        let mut j = h;
        j.mul_assign(&i);

        // r = 2*(S2-Y1)
        let mut r = s2;
        r.sub_assign(&self.y);
        r.double();

        // V = X1*I
        let mut v = self.x;
        v.mul_assign(&i);

        // X3 = r^2 - J - 2*V
        self.x = r;
        self.x.square();
        self.x.sub_assign(&j);
        self.x.sub_assign(&v);
        self.x.sub_assign(&v);

        // Y3 = r*(V-X3) - 2*Y1*J
        j.mul_assign(&self.y);
        j.double();
        self.y = v;
        self.y.sub_assign(&self.x);
        self.y.mul_assign(&r);
        self.y.sub_assign(&j);

        // Z3 = (Z1+H)^2 - Z1Z1 - HH
        self.z.add_assign(&h);
        self.z.square();
        self.z.sub_assign(&z1z1);
        self.z.sub_assign(&hh);
    }

    /// Left-to-right double-and-add over the scalar bits, skipping leading
    /// zeros.
    pub fn mul(&self, scalar: &[u64], curve: &WeierstrassCurve<E>) -> Self {
        let mut res = Self::zero(&self.x);
        let mut found_one = false;
        for bit in crate::scalar::RevBitIterator::new(scalar) {
            if found_one {
                res.mul2(curve);
            } else {
                found_one = bit;
            }

            if bit {
                res.add_assign(self, curve);
            }
        }

        res
    }
}

impl<E: FieldElement> PartialEq for CurvePoint<E> {
    fn eq(&self, other: &Self) -> bool {
        let self_zero = self.is_zero();
        let other_zero = other.is_zero();
        if self_zero || other_zero {
            return self_zero && other_zero;
        }

        // cross-multiply to compare without inversions
        let mut lhs_zz = self.z;
        lhs_zz.square();
        let mut lhs_zzz = lhs_zz;
        lhs_zzz.mul_assign(&self.z);
        let mut rhs_zz = other.z;
        rhs_zz.square();
        let mut rhs_zzz = rhs_zz;
        rhs_zzz.mul_assign(&other.z);

        let mut lhs_x = self.x;
        lhs_x.mul_assign(&rhs_zz);
        let mut rhs_x = other.x;
        rhs_x.mul_assign(&lhs_zz);

        let mut lhs_y = self.y;
        lhs_y.mul_assign(&rhs_zzz);
        let mut rhs_y = other.y;
        rhs_y.mul_assign(&lhs_zzz);

        lhs_x == rhs_x && lhs_y == rhs_y
    }
}

impl<E: FieldElement> Eq for CurvePoint<E> {}
