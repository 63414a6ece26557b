#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bits<T>(pub T);

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bytes<T>(pub T);

impl<T> From<Bytes<T>> for Bits<T>
where
    T: std::ops::Mul<usize, Output = T>,
{
    fn from(value: Bytes<T>) -> Self {
        Self(value.0 * 8)
    }
}

impl<T> Bits<T>
where
    T: Copy,
    T: std::ops::Div<usize, Output = T>,
    T: std::ops::Rem<usize, Output = T>,
{
    /// Whole bytes, plus the bits left over.
    pub fn as_pair(self) -> (Bytes<T>, Bits<T>) {
        (Bytes(self.0 / 8), Bits(self.0 % 8))
    }
}

impl From<Bits<u8>> for Bits<usize> {
    fn from(value: Bits<u8>) -> Self {
        Self(usize::from(value.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_pair() {
        assert_eq!(Bits(9usize).as_pair(), (Bytes(1), Bits(1)));
        assert_eq!(Bits(32usize).as_pair(), (Bytes(4), Bits(0)));
        assert_eq!(Bits::from(Bytes(3usize)), Bits(24));
    }
}
