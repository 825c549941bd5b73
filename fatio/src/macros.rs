// SPDX-License-Identifier: MIT

/// Implements little-endian read helpers for primitive types on FatIO
macro_rules! fatio_impl_primitive_read {
    ($($ty:ty),+ $(,)?) => {
        $(
            paste::paste! {
                #[inline(always)]
                fn [<read_ $ty _at>](&mut self, offset: u64) -> FatIOResult<$ty> {
                    let mut buf = [0u8; core::mem::size_of::<$ty>()];
                    self.read_at(offset, &mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )+
    };
}
