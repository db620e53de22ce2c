//! Codec implementations for tuples.
//!
//! Tuples are anonymous composites: the concatenation of their fields'
//! encodings in order, with no framing and no count.

use crate::{Decode, Deserializer, Encode, Error, Populate, Serializer};
use paste::paste;

macro_rules! impl_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Encode ),*> Encode for ( $( [<T $index>], )* ) {
                fn encode(&self, ser: &mut Serializer) -> Result<(), Error> {
                    $( self.$index.encode(ser)?; )*
                    Ok(())
                }
            }

            impl<$( [<T $index>]: Decode ),*> Decode for ( $( [<T $index>], )* ) {
                fn decode(de: &mut Deserializer<'_>) -> Result<Self, Error> {
                    Ok(( $( de.read::<[<T $index>]>()? , )* ))
                }
            }

            impl<$( [<T $index>]: Decode ),*> Populate for ( $( [<T $index>], )* ) {
                fn populate(&mut self, de: &mut Deserializer<'_>) -> Result<(), Error> {
                    *self = Self::decode(de)?;
                    Ok(())
                }
            }
        }
    };
}

impl_tuple!(0);
impl_tuple!(0, 1);
impl_tuple!(0, 1, 2);
impl_tuple!(0, 1, 2, 3);
impl_tuple!(0, 1, 2, 3, 4);
impl_tuple!(0, 1, 2, 3, 4, 5);
