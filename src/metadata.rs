crate::reexport!(backend);
crate::reexport!(http);
crate::reexport!(cache);
crate::reexport!(column);
crate::reexport!(table);
